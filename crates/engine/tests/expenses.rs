use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection, EntityTrait};

use engine::{Category, Engine, EngineError, Expense, PaymentType, expenses};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine() -> Engine {
    engine_with_db().await.0
}

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 10, minute, 0).unwrap()
}

fn expense_at(created_at: DateTime<Utc>, description: &str) -> Expense {
    let mut expense = Expense::new(
        Category::Materials,
        PaymentType::Card,
        description.to_string(),
        Decimal::new(12345, 2),
    )
    .with_user(1);
    expense.created_at = created_at;
    expense.updated_at = created_at;
    expense
}

#[tokio::test]
async fn insert_then_list_round_trips() {
    let engine = engine().await;
    let expense = engine::parse("карта 123.45 материалы обои в коридор")
        .unwrap()
        .with_user(42);

    engine.insert_expense(&expense).await.unwrap();

    let items = engine.list_expenses(-1).await.unwrap();
    assert_eq!(items, vec![expense]);
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let engine = engine().await;
    let expense = expense_at(at(0), "once");

    engine.insert_expense(&expense).await.unwrap();
    let err = engine.insert_expense(&expense).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey(expense.id.to_string()));
}

#[tokio::test]
async fn list_is_newest_first_and_honours_limit() {
    let engine = engine().await;
    for minute in [3, 1, 4, 0, 2] {
        engine
            .insert_expense(&expense_at(at(minute), &format!("m{minute}")))
            .await
            .unwrap();
    }

    let two = engine.list_expenses(2).await.unwrap();
    let names: Vec<&str> = two.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, vec!["m4", "m3"]);

    let all = engine.list_expenses(0).await.unwrap();
    assert_eq!(all.len(), 5);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(engine.list_expenses(-1).await.unwrap(), all);
    assert_eq!(engine.list_expenses(50).await.unwrap(), all);
}

#[tokio::test]
async fn delete_hides_record_but_keeps_it_stored() {
    let (engine, db) = engine_with_db().await;
    let keep = expense_at(at(1), "keep");
    let gone = expense_at(at(2), "gone");
    engine.insert_expense(&keep).await.unwrap();
    engine.insert_expense(&gone).await.unwrap();

    assert!(engine.delete_expense(gone.id).await.unwrap());
    assert_eq!(engine.list_expenses(-1).await.unwrap(), vec![keep]);

    // Second delete is a silent no-op.
    assert!(!engine.delete_expense(gone.id).await.unwrap());
    assert!(!engine.delete_expense(Uuid::new_v4()).await.unwrap());

    let stored = expenses::Entity::find_by_id(gone.id.to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.deleted_at.is_some());
}

#[tokio::test]
async fn update_category_changes_category_and_advances_updated_at() {
    let engine = engine().await;
    let expense = expense_at(at(5), "стол");
    engine.insert_expense(&expense).await.unwrap();

    assert!(
        engine
            .update_expense_category(expense.id, Category::Furniture)
            .await
            .unwrap()
    );

    let items = engine.list_expenses(-1).await.unwrap();
    let updated = &items[0];
    assert_eq!(updated.category, Category::Furniture);
    assert!(updated.updated_at > expense.updated_at);
    assert_eq!(updated.created_at, expense.created_at);
    assert_eq!(updated.amount, expense.amount);
    assert_eq!(updated.description, expense.description);
    assert_eq!(updated.payment_type, expense.payment_type);
}

#[tokio::test]
async fn update_category_is_strictly_increasing_even_from_the_future() {
    let engine = engine().await;
    let future = Utc::now() + Duration::days(1);
    let mut expense = expense_at(at(0), "future");
    expense.updated_at = future;
    engine.insert_expense(&expense).await.unwrap();

    engine
        .update_expense_category(expense.id, Category::Tools)
        .await
        .unwrap();

    let items = engine.list_expenses(-1).await.unwrap();
    assert!(items[0].updated_at > future);
}

#[tokio::test]
async fn update_category_on_missing_or_deleted_is_a_no_op() {
    let engine = engine().await;
    assert!(
        !engine
            .update_expense_category(Uuid::new_v4(), Category::Labor)
            .await
            .unwrap()
    );

    let expense = expense_at(at(0), "deleted");
    engine.insert_expense(&expense).await.unwrap();
    engine.delete_expense(expense.id).await.unwrap();
    let watermark = engine.latest_updated_at().await.unwrap();

    assert!(
        !engine
            .update_expense_category(expense.id, Category::Labor)
            .await
            .unwrap()
    );
    assert_eq!(engine.latest_updated_at().await.unwrap(), watermark);
}

#[tokio::test]
async fn watermark_is_epoch_when_empty() {
    let engine = engine().await;
    assert_eq!(
        engine.latest_updated_at().await.unwrap(),
        DateTime::<Utc>::UNIX_EPOCH
    );
}

#[tokio::test]
async fn watermark_tracks_inserts_and_updates_monotonically() {
    let engine = engine().await;
    let first = expense_at(at(1), "first");
    let second = expense_at(at(2), "second");
    let older = expense_at(at(0), "older");

    engine.insert_expense(&first).await.unwrap();
    let w1 = engine.latest_updated_at().await.unwrap();
    assert_eq!(w1, first.updated_at);

    engine.insert_expense(&second).await.unwrap();
    let w2 = engine.latest_updated_at().await.unwrap();
    assert_eq!(w2, second.updated_at);

    engine.insert_expense(&older).await.unwrap();
    let w3 = engine.latest_updated_at().await.unwrap();
    assert_eq!(w3, w2);

    engine
        .update_expense_category(older.id, Category::Labor)
        .await
        .unwrap();
    let w4 = engine.latest_updated_at().await.unwrap();
    assert!(w4 > w3);

    let live = engine.list_expenses(-1).await.unwrap();
    assert!(live.iter().all(|e| e.updated_at <= w4));
    assert!(live.iter().any(|e| e.updated_at == w4));
}

#[tokio::test]
async fn watermark_ignores_deleted_records() {
    let engine = engine().await;
    let a = expense_at(at(1), "a");
    let b = expense_at(at(2), "b");
    engine.insert_expense(&a).await.unwrap();
    engine.insert_expense(&b).await.unwrap();

    engine.delete_expense(b.id).await.unwrap();
    assert_eq!(engine.latest_updated_at().await.unwrap(), a.updated_at);

    engine.delete_expense(a.id).await.unwrap();
    assert_eq!(
        engine.latest_updated_at().await.unwrap(),
        DateTime::<Utc>::UNIX_EPOCH
    );
}
