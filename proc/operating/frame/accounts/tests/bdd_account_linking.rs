//! BDD测试 - 账户/用户链接协议
//!
//! 测试链接协议的全部分支：
//! 1. 建链与幂等重链
//! 2. 双向冲突检测（冲突时不得改写任何一侧）
//! 3. 解除链接与残缺链接的自愈短路
//! 4. 链接指向缺失用户时的完整性错误

use std::sync::Arc;

use account_behavior::proc::account_service::AccountServiceImpl;
use account_behavior::proc::behavior::account_behavior::{
    AccountCmdAny, AccountCmdError, AccountResAny, CreateAccountCmd, ErrorKind, LinkUserCmd,
    UnlinkUserCmd,
};
use base_types::account::account::Account;
use base_types::account::status::Status;
use base_types::account::user::User;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::handler::handler::Handler;
use base_types::{Timestamp, UserId, Username};
use doc_repo::{DocRepo, MemDocRepo};

// ============================================================================
// 测试装配
// ============================================================================

type AccountRepo = Arc<MemDocRepo<Account>>;
type UserRepo = Arc<MemDocRepo<User>>;
type StatusRepo = Arc<MemDocRepo<Status>>;
type Service = AccountServiceImpl<AccountRepo, UserRepo, StatusRepo>;

fn service() -> (Arc<Service>, AccountRepo, UserRepo) {
    let accounts: AccountRepo = Arc::new(MemDocRepo::new());
    let users: UserRepo = Arc::new(MemDocRepo::new());
    let statuses: StatusRepo = Arc::new(MemDocRepo::new());
    let service =
        Arc::new(AccountServiceImpl::new(accounts.clone(), users.clone(), statuses.clone()));
    (service, accounts, users)
}

fn seed_user(users: &UserRepo, id: u64, username: &str) -> User {
    users
        .insert(User::new(UserId(id), Username::new(username), Timestamp::now_as_millis()))
        .unwrap()
}

async fn create_account(service: &Service, name: &str) -> Account {
    let resp = service
        .handle(AccountCmdAny::Create(CreateAccountCmd {
            metadata: CMetadata::default(),
            name: name.to_string(),
        }))
        .await
        .unwrap();
    match resp.result {
        AccountResAny::Account(account) => account,
        other => panic!("expected account, got {:?}", other),
    }
}

async fn link(service: &Service, account: &Account, username: &str) -> Result<Account, AccountCmdError> {
    let resp = service
        .handle(AccountCmdAny::LinkUser(LinkUserCmd {
            metadata: CMetadata::default(),
            account_id: account.id(),
            username: username.to_string(),
        }))
        .await?;
    match resp.result {
        AccountResAny::Account(account) => Ok(account),
        other => panic!("expected account, got {:?}", other),
    }
}

async fn unlink(service: &Service, account: &Account) -> Result<Account, AccountCmdError> {
    let resp = service
        .handle(AccountCmdAny::UnlinkUser(UnlinkUserCmd {
            metadata: CMetadata::default(),
            account_id: account.id(),
        }))
        .await?;
    match resp.result {
        AccountResAny::Account(account) => Ok(account),
        other => panic!("expected account, got {:?}", other),
    }
}

// ============================================================================
// BDD 场景 1：建链写两侧，重复建链幂等
// ============================================================================

#[tokio::test]
async fn scenario_link_writes_both_sides_and_relink_is_idempotent() {
    // ========== Given（给定）==========
    let (service, accounts, users) = service();
    let user = seed_user(&users, 11, "JaneD");
    let account = create_account(&service, "Jane Q Doe").await;

    // ========== When（当）==========
    // 管理员把 janed 链接到该账户（用户名大小写混合，服务端归一化）
    let linked = link(&service, &account, "JaneD").await.unwrap();

    // ========== Then（那么）==========
    // 账户侧持有 {id, username}，用户侧指回 {id, name}
    let account_link = linked.user().expect("account side link");
    assert_eq!(account_link.id, Some(user.id()));
    assert_eq!(account_link.username.as_str(), "janed");

    let stored_user = users.find_by_id(&user.id()).unwrap().unwrap();
    let user_link = stored_user.roles().account.as_ref().expect("user side link");
    assert_eq!(user_link.id, account.id());
    assert_eq!(user_link.name, "Jane Q Doe");
    println!("✓ 双侧链接写入成功");

    // 同一对重复建链：成功且链接状态不变
    let relinked = link(&service, &account, "janed").await.unwrap();
    assert_eq!(relinked.user(), linked.user());
    let stored_account = accounts.find_by_id(&account.id()).unwrap().unwrap();
    assert_eq!(stored_account.user(), linked.user());
    println!("✓ 幂等重链不改变链接状态");
}

// ============================================================================
// BDD 场景 2：冲突检测，且冲突不改写任何一侧
// ============================================================================

#[tokio::test]
async fn scenario_link_conflicts_do_not_mutate_either_aggregate() {
    let (service, accounts, users) = service();
    let user = seed_user(&users, 21, "janed");
    let first = create_account(&service, "Jane Q Doe").await;
    let second = create_account(&service, "John P Smith").await;

    let _ = link(&service, &first, "janed").await.unwrap();

    // When: 把已链接的用户再链接到另一个账户
    let err = link(&service, &second, "janed").await.unwrap_err();

    // Then: Conflict，且两个聚合都保持原状
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(err, AccountCmdError::UserAlreadyLinked { .. }));

    let stored_second = accounts.find_by_id(&second.id()).unwrap().unwrap();
    assert!(stored_second.user().is_none(), "conflict must not touch the second account");
    let stored_user = users.find_by_id(&user.id()).unwrap().unwrap();
    assert_eq!(stored_user.linked_account(), Some(first.id()));
    println!("✓ 用户侧冲突被拒绝且无副作用");

    // 反向冲突：账户已链接其他用户
    seed_user(&users, 22, "second-user");
    let err = link(&service, &first, "second-user").await.unwrap_err();
    assert!(matches!(err, AccountCmdError::AccountAlreadyLinked { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let stored_first = accounts.find_by_id(&first.id()).unwrap().unwrap();
    assert_eq!(stored_first.user().unwrap().username.as_str(), "janed");
    println!("✓ 账户侧冲突被拒绝且无副作用");
}

// ============================================================================
// BDD 场景 3：解除链接 + 自愈短路
// ============================================================================

#[tokio::test]
async fn scenario_unlink_and_self_heal_short_circuit() {
    let (service, accounts, users) = service();
    let user = seed_user(&users, 31, "janed");
    let account = create_account(&service, "Jane Q Doe").await;
    let _ = link(&service, &account, "janed").await.unwrap();

    // 正常解链：双侧清空
    let unlinked = unlink(&service, &account).await.unwrap();
    assert!(unlinked.user().is_none());
    let stored_user = users.find_by_id(&user.id()).unwrap().unwrap();
    assert_eq!(stored_user.linked_account(), None);
    println!("✓ 正常解链清空双侧");

    // 没有任何链接时解链也成功（无用户查找可言）
    let unlinked = unlink(&service, &account).await.unwrap();
    assert!(unlinked.user().is_none());

    // 残缺链接（只有 username 没有 id）：短路清理，不查用户。
    // 集合里根本不存在叫 ghost 的用户，操作仍然成功
    accounts
        .find_by_id_and_update(&account.id(), |a| a.set_partial_user_link(Username::new("ghost")))
        .unwrap()
        .unwrap();
    let healed = unlink(&service, &account).await.unwrap();
    assert!(healed.user().is_none());
    println!("✓ 残缺链接自愈短路成功");
}

// ============================================================================
// BDD 场景 4：链接指向缺失用户 -> 完整性错误（NotFound）
// ============================================================================

#[tokio::test]
async fn scenario_unlink_with_dangling_user_id_is_integrity_error() {
    let (service, accounts, _users) = service();
    let account = create_account(&service, "Jane Q Doe").await;

    // 账户侧带有完整链接，但指向的用户不存在
    accounts
        .find_by_id_and_update(&account.id(), |a| {
            a.link_user(UserId(9999), Username::new("vanished"))
        })
        .unwrap()
        .unwrap();

    let err = unlink(&service, &account).await.unwrap_err();
    assert!(matches!(err, AccountCmdError::LinkedUserMissing { id: UserId(9999) }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// BDD 场景 5：完整业务流程 - 建链 -> 冲突 -> 解链 -> 改链
// ============================================================================

#[tokio::test]
async fn scenario_full_link_lifecycle() {
    // Feature: 账户/用户链接生命周期
    // Scenario: "Jane Q Doe" 与 janed 建链，换绑到第二个账户

    let (service, _accounts, users) = service();
    seed_user(&users, 41, "janed");

    // Step 1: 创建账户并建链
    let first = create_account(&service, "Jane Q Doe").await;
    let first = link(&service, &first, "janed").await.unwrap();
    assert!(first.user().is_some());

    // Step 2: janed 再链接到第二个账户 -> Conflict
    let second = create_account(&service, "Jane Alternate Doe").await;
    let err = link(&service, &second, "janed").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Step 3: 解链后改绑第二个账户 -> 成功
    let _ = unlink(&service, &first).await.unwrap();
    let second = link(&service, &second, "janed").await.unwrap();
    assert_eq!(second.user().unwrap().username.as_str(), "janed");

    let stored_user = users.find_one(|u| u.username().as_str() == "janed").unwrap().unwrap();
    assert_eq!(stored_user.linked_account(), Some(second.id()));
    println!("✓ 完整链接生命周期通过");
}

// ============================================================================
// BDD 场景 6：目标缺失 -> NotFound
// ============================================================================

#[tokio::test]
async fn scenario_link_missing_targets_are_not_found() {
    let (service, _accounts, users) = service();
    let account = create_account(&service, "Jane Q Doe").await;

    // 用户不存在
    let err = link(&service, &account, "nobody").await.unwrap_err();
    assert!(matches!(err, AccountCmdError::UserNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // 账户不存在
    seed_user(&users, 51, "janed");
    let err = service
        .handle(AccountCmdAny::LinkUser(LinkUserCmd {
            metadata: CMetadata::default(),
            account_id: base_types::AccountId(424242),
            username: "janed".to_string(),
        }))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountCmdError::AccountNotFound { .. }));
}
