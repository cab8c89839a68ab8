use quiz_core::model::{Answer, Question, QuestionId};
use quiz_core::time::fixed_now;
use storage::repository::{QuestionRepository, Storage};
use storage::sqlite::SqliteRepository;

fn capital_question() -> Question {
    Question::new(
        "Capital of Nigeria?",
        vec![
            Answer::incorrect("Lagos"),
            Answer::correct("Abuja"),
            Answer::incorrect("Kano"),
            Answer::incorrect("Port Harcourt"),
        ],
    )
    .unwrap()
}

fn arithmetic_question() -> Question {
    Question::new(
        "2 + 2?",
        vec![Answer::correct("4"), Answer::incorrect("5")],
    )
    .unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_order_and_correctness() {
    let repo = connect("memdb_roundtrip").await;

    let ids = repo
        .append_questions(&[capital_question(), arithmetic_question()], fixed_now())
        .await
        .unwrap();
    assert_eq!(ids, vec![QuestionId::new(1), QuestionId::new(2)]);

    let records = repo.list_questions().await.unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.id, QuestionId::new(1));
    assert_eq!(first.imported_at, fixed_now());
    assert_eq!(first.question, capital_question());
    let texts: Vec<_> = first.question.answers().iter().map(Answer::text).collect();
    assert_eq!(texts, vec!["Lagos", "Abuja", "Kano", "Port Harcourt"]);
    assert_eq!(first.question.correct_position(), 1);

    assert_eq!(records[1].question, arithmetic_question());
}

#[tokio::test]
async fn sqlite_count_and_clear() {
    let repo = connect("memdb_count_clear").await;
    assert_eq!(repo.count_questions().await.unwrap(), 0);
    assert!(repo.list_questions().await.unwrap().is_empty());

    repo.append_questions(&[capital_question()], fixed_now())
        .await
        .unwrap();
    repo.append_questions(&[arithmetic_question()], fixed_now())
        .await
        .unwrap();
    assert_eq!(repo.count_questions().await.unwrap(), 2);

    repo.clear_questions().await.unwrap();
    assert_eq!(repo.count_questions().await.unwrap(), 0);
    assert!(repo.list_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    repo.append_questions(&[capital_question()], fixed_now())
        .await
        .unwrap();
    assert_eq!(repo.count_questions().await.unwrap(), 1);
}

#[tokio::test]
async fn storage_facade_uses_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_facade?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .questions
        .append_questions(&[arithmetic_question()], fixed_now())
        .await
        .unwrap();
    let records = storage.questions.list_questions().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].question.text(), "2 + 2?");
}
