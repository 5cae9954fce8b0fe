use sea_orm::Database;

use engine::{Engine, EngineError, NewPayment, PaidByEntry, PaymentCategory, PaymentUpdate};
use migration::MigratorTrait;

async fn engine_with_users(usernames: &[&str]) -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    for username in usernames {
        engine
            .register_user(username, None, "password")
            .await
            .unwrap();
    }
    engine
}

fn entry(member: &str, amount_minor: i64) -> PaidByEntry {
    PaidByEntry {
        member: member.to_string(),
        amount_minor,
    }
}

#[tokio::test]
async fn create_and_join_list_by_share_code() {
    let engine = engine_with_users(&["alice", "bob"]).await;

    let list = engine.create_list("Trip", "alice").await.unwrap();
    assert_eq!(list.creator, "alice");
    assert_eq!(list.share_code.len(), 6);
    assert_eq!(list.members.len(), 1);

    let joined = engine.join_list(&list.share_code, "bob").await.unwrap();
    assert_eq!(joined.id, list.id);
    assert_eq!(joined.members.len(), 2);

    // Joining twice is a no-op.
    let joined_again = engine.join_list(&list.share_code, "bob").await.unwrap();
    assert_eq!(joined_again.members.len(), 2);

    let err = engine.join_list("zzzzzz", "bob").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("no list with this code".to_string())
    );
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let engine = engine_with_users(&["alice"]).await;
    let err = engine
        .register_user("Alice", None, "password")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("alice".to_string()));
}

#[tokio::test]
async fn lists_for_user_only_shows_memberships() {
    let engine = engine_with_users(&["alice", "bob"]).await;

    engine.create_list("Mine", "alice").await.unwrap();
    engine.create_list("Theirs", "bob").await.unwrap();

    let lists = engine.lists_for_user("alice", 1, 10).await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Mine");
}

#[tokio::test]
async fn equal_payment_covers_current_member_set() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();

    let payment = engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::equal_split(3000, PaymentCategory::Food),
        )
        .await
        .unwrap();

    assert!(payment.is_equally_paid);
    assert_eq!(
        payment.paid_by,
        vec![entry("alice", 1500), entry("bob", 1500)]
    );
    assert_eq!(payment.payment_for, "food");

    let (detail, payments) = engine.list_detail(&list.id, "bob").await.unwrap();
    assert_eq!(detail.total_amount_minor, 3000);
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].paid_by, payment.paid_by);
}

#[tokio::test]
async fn payment_with_non_member_payer_is_rejected() {
    let engine = engine_with_users(&["alice", "bob", "charlie"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();

    let err = engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 500), entry("charlie", 500)],
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidMembers("charlie".to_string()));
}

#[tokio::test]
async fn payment_amount_mismatch_is_rejected() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();

    let err = engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 500), entry("bob", 400)],
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::AmountMismatch("900 vs 1000".to_string()));
}

#[tokio::test]
async fn spend_and_payables_end_to_end() {
    let engine = engine_with_users(&["alice", "bob", "carol"]).await;
    let list = engine.create_list("Holiday", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();
    engine.join_list(&list.share_code, "carol").await.unwrap();

    // 30.00 split equally, then 60.00 fronted by alice alone.
    engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::equal_split(3000, PaymentCategory::Food),
        )
        .await
        .unwrap();
    engine
        .create_payment(
            &list.id,
            "bob",
            NewPayment::with_shares(
                6000,
                PaymentCategory::Travel,
                vec![entry("alice", 6000)],
            ),
        )
        .await
        .unwrap();

    let spend = engine.member_contributions(&list.id, "carol").await.unwrap();
    let totals: Vec<(&str, i64)> = spend
        .iter()
        .map(|member| (member.username.as_str(), member.total_minor))
        .collect();
    assert_eq!(
        totals,
        vec![("alice", 7000), ("bob", 1000), ("carol", 1000)]
    );

    let plan = engine.settlement_plan(&list.id, "carol").await.unwrap();
    let transfers: Vec<(&str, &str, i64)> = plan
        .iter()
        .map(|payable| {
            (
                payable.from_user.as_str(),
                payable.to_user.as_str(),
                payable.amount_minor,
            )
        })
        .collect();
    assert_eq!(
        transfers,
        vec![("bob", "alice", 2000), ("carol", "alice", 2000)]
    );
}

#[tokio::test]
async fn settlement_plan_without_payments_fails() {
    let engine = engine_with_users(&["alice"]).await;
    let list = engine.create_list("Empty", "alice").await.unwrap();

    let err = engine.settlement_plan(&list.id, "alice").await.unwrap_err();
    assert_eq!(err, EngineError::EmptyBalances);
}

#[tokio::test]
async fn update_payment_rewrites_entries_and_total() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();

    let payment = engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::with_shares(
                1000,
                PaymentCategory::Food,
                vec![entry("alice", 600), entry("bob", 400)],
            ),
        )
        .await
        .unwrap();

    let updated = engine
        .update_payment(
            &list.id,
            payment.id,
            "bob",
            PaymentUpdate {
                amount_minor: Some(2000),
                paid_by: Some(vec![entry("bob", 2000)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount_minor, 2000);
    assert_eq!(updated.paid_by, vec![entry("bob", 2000)]);

    let (detail, payments) = engine.list_detail(&list.id, "alice").await.unwrap();
    assert_eq!(detail.total_amount_minor, 2000);
    assert_eq!(payments[0].paid_by, vec![entry("bob", 2000)]);
}

#[tokio::test]
async fn update_unknown_payment_is_not_found() {
    let engine = engine_with_users(&["alice"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();

    let err = engine
        .update_payment(
            &list.id,
            uuid::Uuid::new_v4(),
            "alice",
            PaymentUpdate::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("payment not exists".to_string()));
}

#[tokio::test]
async fn delete_payment_clamps_the_list_total() {
    let engine = engine_with_users(&["alice"]).await;
    let list = engine.create_list("Solo", "alice").await.unwrap();

    let payment = engine
        .create_payment(
            &list.id,
            "alice",
            NewPayment::equal_split(1500, PaymentCategory::Other),
        )
        .await
        .unwrap();

    engine
        .delete_payment(&list.id, payment.id, "alice")
        .await
        .unwrap();

    let (detail, payments) = engine.list_detail(&list.id, "alice").await.unwrap();
    assert_eq!(detail.total_amount_minor, 0);
    assert!(payments.is_empty());
}

#[tokio::test]
async fn only_the_creator_deletes_a_list() {
    let engine = engine_with_users(&["alice", "bob"]).await;
    let list = engine.create_list("Flat", "alice").await.unwrap();
    engine.join_list(&list.share_code, "bob").await.unwrap();

    let err = engine.delete_list(&list.id, "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.delete_list(&list.id, "alice").await.unwrap();
    let err = engine.list_detail(&list.id, "alice").await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("list not exists".to_string()));
}

#[tokio::test]
async fn non_members_cannot_read_a_list() {
    let engine = engine_with_users(&["alice", "mallory"]).await;
    let list = engine.create_list("Private", "alice").await.unwrap();

    let err = engine.list_detail(&list.id, "mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}
