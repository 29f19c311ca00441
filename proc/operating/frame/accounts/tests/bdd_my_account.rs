//! BDD测试 - 本人账户投影
//!
//! "my" 端点按认证身份解析账户ID，返回缩减字段集

use std::sync::Arc;

use account_behavior::proc::account_service::AccountServiceImpl;
use account_behavior::proc::behavior::account_behavior::{
    AccountCmdAny, AccountCmdError, AccountResAny, CreateAccountCmd, ErrorKind, GetMyCmd,
    NamePayload, UpdateMyCmd,
};
use base_types::account::account::Account;
use base_types::account::status::Status;
use base_types::account::user::User;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::handler::handler::Handler;
use base_types::AccountId;
use doc_repo::MemDocRepo;

type AccountRepo = Arc<MemDocRepo<Account>>;
type UserRepo = Arc<MemDocRepo<User>>;
type StatusRepo = Arc<MemDocRepo<Status>>;
type Service = AccountServiceImpl<AccountRepo, UserRepo, StatusRepo>;

fn service() -> Arc<Service> {
    let accounts: AccountRepo = Arc::new(MemDocRepo::new());
    let users: UserRepo = Arc::new(MemDocRepo::new());
    let statuses: StatusRepo = Arc::new(MemDocRepo::new());
    Arc::new(AccountServiceImpl::new(accounts, users, statuses))
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

#[tokio::test]
async fn scenario_my_projection_returns_reduced_fields() {
    // Given: 调用者自己的账户
    let service = service();
    let account = create_account(&service, "Jane Q Doe").await;

    // When: 以认证身份携带的账户ID读取本人账户
    let resp = service
        .handle(AccountCmdAny::GetMy(GetMyCmd {
            metadata: CMetadata::default(),
            account_id: account.id(),
        }))
        .await
        .unwrap();

    // Then: 投影只包含 {_id, user, name, timeCreated}
    let AccountResAny::My(view) = resp.result else { panic!("expected my view") };
    assert_eq!(view.id, account.id());
    assert_eq!(view.name.full_name(), "Jane Q Doe");
    assert_eq!(view.time_created, account.time_created());
    assert!(view.user.is_none());
}

#[tokio::test]
async fn scenario_my_update_changes_name_only() {
    let service = service();
    let account = create_account(&service, "Jane Q Doe").await;

    let resp = service
        .handle(AccountCmdAny::UpdateMy(UpdateMyCmd {
            metadata: CMetadata::default(),
            account_id: account.id(),
            name: NamePayload {
                first: "Janet".to_string(),
                middle: None,
                last: "Doe".to_string(),
            },
        }))
        .await
        .unwrap();

    let AccountResAny::My(view) = resp.result else { panic!("expected my view") };
    assert_eq!(view.name.full_name(), "Janet Doe");

    // 校验失败的姓名在写入前被拒绝
    let err = service
        .handle(AccountCmdAny::UpdateMy(UpdateMyCmd {
            metadata: CMetadata::default(),
            account_id: account.id(),
            name: NamePayload { first: "".to_string(), middle: None, last: "Doe".to_string() },
        }))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn scenario_my_with_unlinked_identity_is_not_found() {
    let service = service();

    let err = service
        .handle(AccountCmdAny::GetMy(GetMyCmd {
            metadata: CMetadata::default(),
            account_id: AccountId(31337),
        }))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountCmdError::AccountNotFound { .. }));
}
