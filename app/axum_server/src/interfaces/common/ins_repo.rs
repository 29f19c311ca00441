//! 仓储与服务单例
//!
//! 三个文档集合各一个仓储实例，进程内全局共享；
//! 用户集合由外部认证子系统负责写入，这里共享同一实例供链接协议读写

use std::sync::Arc;

use account_behavior::proc::account_service::AccountServiceImpl;
use account_behavior::proc::status_service::StatusCatalogImpl;
use base_types::account::account::Account;
use base_types::account::status::Status;
use base_types::account::user::User;
use doc_repo::MemDocRepo;
use once_cell::sync::Lazy;

pub type AccountRepo = Arc<MemDocRepo<Account>>;
pub type UserRepo = Arc<MemDocRepo<User>>;
pub type StatusRepo = Arc<MemDocRepo<Status>>;

pub type AccountService = AccountServiceImpl<AccountRepo, UserRepo, StatusRepo>;
pub type StatusCatalog = StatusCatalogImpl<StatusRepo>;

static ACCOUNT_REPO: Lazy<AccountRepo> = Lazy::new(|| Arc::new(MemDocRepo::new()));
static USER_REPO: Lazy<UserRepo> = Lazy::new(|| Arc::new(MemDocRepo::new()));
static STATUS_REPO: Lazy<StatusRepo> = Lazy::new(|| Arc::new(MemDocRepo::new()));

// 核心服务单例（直接包装在 Arc 中）
static ACCOUNT_SERVICE: Lazy<Arc<AccountService>> = Lazy::new(|| {
    Arc::new(AccountServiceImpl::new(
        ACCOUNT_REPO.clone(),
        USER_REPO.clone(),
        STATUS_REPO.clone(),
    ))
});

static STATUS_CATALOG: Lazy<Arc<StatusCatalog>> =
    Lazy::new(|| Arc::new(StatusCatalogImpl::new(STATUS_REPO.clone())));

pub fn get_account_service() -> Arc<AccountService> {
    ACCOUNT_SERVICE.clone()
}

pub fn get_status_catalog() -> Arc<StatusCatalog> {
    STATUS_CATALOG.clone()
}

/// 认证子系统共享的用户集合
pub fn get_user_repo() -> UserRepo {
    USER_REPO.clone()
}
