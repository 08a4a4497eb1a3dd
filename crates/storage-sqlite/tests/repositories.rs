//! Integration tests running the repositories against a real SQLite file.

use std::sync::Arc;

use chrono::{Duration, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ohda_core::auth::OtpPurpose;
use ohda_core::expenses::{ExpenseKind, ExpenseRecord, ExpenseRepositoryTrait};
use ohda_core::floats::{Float, FloatRepositoryTrait, FloatStatus};
use ohda_core::requests::{FloatRequest, RequestRepositoryTrait};
use ohda_core::users::{NewUser, PendingCode, Role, UserRepositoryTrait};
use ohda_core::Error;

use ohda_storage_sqlite::db::{get_connection, init, spawn_writer, DbPool, WriteHandle};
use ohda_storage_sqlite::expenses::ExpenseRepository;
use ohda_storage_sqlite::floats::FloatRepository;
use ohda_storage_sqlite::requests::RequestRepository;
use ohda_storage_sqlite::schema::floats;
use ohda_storage_sqlite::users::UserRepository;

struct TestDb {
    // Held so the directory outlives the pool.
    _dir: tempfile::TempDir,
    pool: DbPool,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ohda-test.db");
    let pool = init(path.to_str().unwrap()).unwrap();
    let writer = spawn_writer(pool.clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn make_float(id: i64, employee: &str, status: FloatStatus, balance: Decimal) -> Float {
    let now = Utc::now();
    Float {
        id,
        employee: employee.to_string(),
        sequence: id as i32,
        start_date: now.date_naive(),
        amount: balance,
        current_balance: balance,
        closing_balance: Decimal::ZERO,
        status,
        closing_date: None,
        created_at: now.naive_utc(),
        updated_at: now.naive_utc(),
    }
}

fn make_expense(
    id: &str,
    float_id: i64,
    record_no: i64,
    kind: ExpenseKind,
    amount: Decimal,
) -> ExpenseRecord {
    let now = Utc::now();
    ExpenseRecord {
        id: id.to_string(),
        record_no,
        float_id,
        kind,
        date: now.date_naive(),
        name: "مشتريات موقع".to_string(),
        description: Some("أسمنت وحديد".to_string()),
        project_name: None,
        amount,
        file: None,
        created_at: now.naive_utc(),
        updated_at: now.naive_utc(),
    }
}

fn make_request(id: &str, float_id: i64, status: FloatStatus, offset_secs: i64) -> FloatRequest {
    FloatRequest {
        id: id.to_string(),
        float_id,
        employee: "مهندس سامح حافظ".to_string(),
        sequence: 1,
        request_date: Utc::now().date_naive(),
        new_amount: dec!(1000),
        previous_closing_balance: dec!(0),
        transfer_amount: dec!(1000),
        status,
        recorded_at: Utc::now() + Duration::seconds(offset_secs),
    }
}

const EMPLOYEE: &str = "مهندس سامح حافظ";

#[tokio::test]
async fn float_round_trip_preserves_the_arabic_status_literal() {
    let db = setup();
    let repo = FloatRepository::new(db.pool.clone(), db.writer.clone());

    let float = make_float(1, EMPLOYEE, FloatStatus::AwaitingAccountant, dec!(1000));
    repo.insert(float.clone()).await.unwrap();

    // The raw column must carry the wire literal, not an enum name.
    let mut conn = get_connection(&db.pool).unwrap();
    let raw_status: String = floats::table
        .find(1)
        .select(floats::status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(raw_status, "بانتظار مراجعة المحاسب");

    let loaded = repo.find_by_id(1).unwrap().expect("float stored");
    assert_eq!(loaded, float);
}

#[tokio::test]
async fn apply_balance_delta_adjusts_only_open_floats() {
    let db = setup();
    let repo = FloatRepository::new(db.pool.clone(), db.writer.clone());

    repo.insert(make_float(1, EMPLOYEE, FloatStatus::Open, dec!(1000)))
        .await
        .unwrap();
    repo.insert(make_float(2, EMPLOYEE, FloatStatus::AwaitingDoctor, dec!(500)))
        .await
        .unwrap();

    let updated = repo.apply_balance_delta(1, dec!(-300)).await.unwrap();
    assert_eq!(updated.current_balance, dec!(700));

    // Overdraft is allowed.
    let updated = repo.apply_balance_delta(1, dec!(-900)).await.unwrap();
    assert_eq!(updated.current_balance, dec!(-200));

    assert!(matches!(
        repo.apply_balance_delta(2, dec!(-100)).await,
        Err(Error::State(_))
    ));
    assert!(matches!(
        repo.apply_balance_delta(99, dec!(-100)).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn supersedable_lookups_follow_status_and_ordering() {
    let db = setup();
    let repo = FloatRepository::new(db.pool.clone(), db.writer.clone());

    repo.insert(make_float(1, EMPLOYEE, FloatStatus::Closed, dec!(0)))
        .await
        .unwrap();
    repo.insert(make_float(2, EMPLOYEE, FloatStatus::PartiallyClosed, dec!(250)))
        .await
        .unwrap();
    repo.insert(make_float(3, EMPLOYEE, FloatStatus::Open, dec!(800)))
        .await
        .unwrap();
    repo.insert(make_float(4, "موظف آخر", FloatStatus::Open, dec!(100)))
        .await
        .unwrap();

    let latest = repo.latest_supersedable(EMPLOYEE).unwrap().unwrap();
    assert_eq!(latest.id, 3);

    let partially = repo
        .latest_partially_closed_before(EMPLOYEE, 3)
        .unwrap()
        .unwrap();
    assert_eq!(partially.id, 2);
    assert!(repo
        .latest_partially_closed_before(EMPLOYEE, 2)
        .unwrap()
        .is_none());

    assert_eq!(repo.max_id().unwrap(), Some(4));
    assert_eq!(repo.list_by_employee(EMPLOYEE).unwrap().len(), 3);
}

#[tokio::test]
async fn invoices_and_replacements_share_the_record_number_space() {
    let db = setup();
    let floats_repo = FloatRepository::new(db.pool.clone(), db.writer.clone());
    let repo = ExpenseRepository::new(db.pool.clone(), db.writer.clone());

    floats_repo
        .insert(make_float(1, EMPLOYEE, FloatStatus::Open, dec!(1000)))
        .await
        .unwrap();

    repo.insert(make_expense("a", 1, 1, ExpenseKind::Invoice, dec!(50)))
        .await
        .unwrap();
    repo.insert(make_expense("b", 1, 2, ExpenseKind::Invoice, dec!(60)))
        .await
        .unwrap();
    repo.insert(make_expense("c", 1, 3, ExpenseKind::Replacement, dec!(70)))
        .await
        .unwrap();

    assert_eq!(repo.last_record_no(1).unwrap(), Some(3));
    assert_eq!(repo.last_record_no(2).unwrap(), None);

    // Lookup crosses both collections.
    let found = repo.find_by_id("c").unwrap().unwrap();
    assert_eq!(found.kind, ExpenseKind::Replacement);
    assert_eq!(found.amount, dec!(70));

    let all = repo.list_for_float(1, None).unwrap();
    assert_eq!(
        all.iter().map(|r| r.record_no).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    let invoices_only = repo.list_for_float(1, Some(ExpenseKind::Invoice)).unwrap();
    assert_eq!(invoices_only.len(), 2);
}

#[tokio::test]
async fn expense_update_rewrites_the_right_table() {
    let db = setup();
    let floats_repo = FloatRepository::new(db.pool.clone(), db.writer.clone());
    let repo = ExpenseRepository::new(db.pool.clone(), db.writer.clone());

    floats_repo
        .insert(make_float(1, EMPLOYEE, FloatStatus::Open, dec!(1000)))
        .await
        .unwrap();
    repo.insert(make_expense("a", 1, 1, ExpenseKind::Invoice, dec!(300)))
        .await
        .unwrap();

    let mut record = repo.find_by_id("a").unwrap().unwrap();
    record.amount = dec!(200);
    record.description = Some("تصحيح".to_string());
    repo.update(record).await.unwrap();

    let reloaded = repo.find_by_id("a").unwrap().unwrap();
    assert_eq!(reloaded.amount, dec!(200));
    assert_eq!(reloaded.description.as_deref(), Some("تصحيح"));

    let missing = make_expense("zz", 1, 9, ExpenseKind::Invoice, dec!(10));
    assert!(matches!(
        repo.update(missing).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn request_log_is_append_only_and_reads_newest_first() {
    let db = setup();
    let floats_repo = FloatRepository::new(db.pool.clone(), db.writer.clone());
    let repo = RequestRepository::new(db.pool.clone(), db.writer.clone());

    floats_repo
        .insert(make_float(1, EMPLOYEE, FloatStatus::Open, dec!(1000)))
        .await
        .unwrap();
    floats_repo
        .insert(make_float(2, EMPLOYEE, FloatStatus::AwaitingAccountant, dec!(2000)))
        .await
        .unwrap();

    repo.append(make_request("r1", 1, FloatStatus::AwaitingAccountant, 0))
        .await
        .unwrap();
    repo.append(make_request("r2", 1, FloatStatus::AwaitingDoctor, 10))
        .await
        .unwrap();
    repo.append(make_request("r3", 1, FloatStatus::Approved, 20))
        .await
        .unwrap();
    repo.append(make_request("r4", 2, FloatStatus::AwaitingAccountant, 30))
        .await
        .unwrap();

    let latest = repo.latest_for_float(1).unwrap().unwrap();
    assert_eq!(latest.id, "r3");
    assert_eq!(latest.status, FloatStatus::Approved);

    let history = repo.history_for_float(1).unwrap();
    assert_eq!(
        history.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        vec!["r1", "r2", "r3"]
    );

    let list = repo.list_latest().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, "r4");
    assert_eq!(list[1].id, "r3");
}

#[tokio::test]
async fn user_pending_code_lifecycle() {
    let db = setup();
    let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

    let user = repo
        .insert(NewUser {
            phone_number: "0501112222".to_string(),
            full_name: EMPLOYEE.to_string(),
            role: Role::Engineer,
            role_label: Some("المهندس".to_string()),
        })
        .await
        .unwrap();

    let expires_at = Utc::now() + Duration::minutes(10);
    repo.set_pending_code(
        &user.id,
        PendingCode {
            code_hash: "abc123".to_string(),
            purpose: OtpPurpose::Approval,
            expires_at,
        },
    )
    .await
    .unwrap();

    let loaded = repo.find_by_phone("0501112222").unwrap().unwrap();
    let pending = loaded.pending_code.expect("code persisted");
    assert_eq!(pending.code_hash, "abc123");
    assert_eq!(pending.purpose, OtpPurpose::Approval);
    assert_eq!(pending.expires_at, expires_at);

    repo.clear_pending_code(&user.id).await.unwrap();
    let loaded = repo.find_by_name(EMPLOYEE).unwrap().unwrap();
    assert!(loaded.pending_code.is_none());

    assert_eq!(repo.list_by_role(Role::Engineer).unwrap().len(), 1);
    assert!(repo.list_by_role(Role::Doctor).unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_phone_number_hits_the_unique_constraint() {
    let db = setup();
    let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

    let new_user = || NewUser {
        phone_number: "0501112222".to_string(),
        full_name: EMPLOYEE.to_string(),
        role: Role::Engineer,
        role_label: None,
    };

    repo.insert(new_user()).await.unwrap();
    assert!(matches!(
        repo.insert(new_user()).await,
        Err(Error::Database(_))
    ));
}
