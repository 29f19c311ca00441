//! 账户服务实现
//!
//! 所有读写都经由注入的文档仓储；跨聚合的链接协议是两次独立的
//! 单文档写入，没有跨文档事务——两写之间失败会留下单侧链接，
//! 该窗口是记录在案的行为，不在本层修补

use base_types::account::account::{Account, AccountName};
use base_types::account::note_entry::NoteEntry;
use base_types::account::status::Status;
use base_types::account::status_entry::StatusEntry;
use base_types::account::user::User;
use base_types::cqrs::cqrs_types::CmdResp;
use base_types::handler::handler::Handler;
use base_types::{AccountId, Timestamp, Username};
use doc_repo::{DocRepo, PageRequest, PageResult};

use crate::proc::behavior::account_behavior::{
    AccountCmdAny, AccountCmdError, AccountResAny, AddNoteCmd, CreateAccountCmd, DeleteAccountCmd,
    DeletedRes, GetAccountCmd, GetMyCmd, LinkUserCmd, MyAccountView, PagedListCmd, SetStatusCmd,
    SortSpec, UnlinkUserCmd, UpdateAccountCmd, UpdateMyCmd,
};

/// 账户服务
pub struct AccountServiceImpl<AR, UR, SR>
where
    AR: DocRepo<Account>,
    UR: DocRepo<User>,
    SR: DocRepo<Status>,
{
    account_repo: AR,
    user_repo: UR,
    status_repo: SR,
}

impl<AR, UR, SR> AccountServiceImpl<AR, UR, SR>
where
    AR: DocRepo<Account>,
    UR: DocRepo<User>,
    SR: DocRepo<Status>,
{
    pub fn new(account_repo: AR, user_repo: UR, status_repo: SR) -> Self {
        Self { account_repo, user_repo, status_repo }
    }

    // ==================== CRUD ====================

    fn create(&self, cmd: CreateAccountCmd) -> Result<Account, AccountCmdError> {
        let name = AccountName::parse(&cmd.name)?;
        let account = Account::new(
            AccountId::from(id_generator::next_id()),
            name,
            Timestamp::now_as_millis(),
        );
        let account = self.account_repo.insert(account)?;
        tracing::info!("account {} created", account.id());

        Ok(account)
    }

    fn get(&self, cmd: GetAccountCmd) -> Result<Account, AccountCmdError> {
        self.account_repo
            .find_by_id(&cmd.account_id)?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    fn update(&self, cmd: UpdateAccountCmd) -> Result<Account, AccountCmdError> {
        let name = cmd.name.into_name()?;
        self.account_repo
            .find_by_id_and_update(&cmd.account_id, |account| account.set_name(name))?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    fn delete(&self, cmd: DeleteAccountCmd) -> Result<DeletedRes, AccountCmdError> {
        let removed = self
            .account_repo
            .find_by_id_and_delete(&cmd.account_id)?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })?;
        tracing::info!("account {} deleted", removed.id());

        Ok(DeletedRes::success())
    }

    // ==================== 链接协议 ====================

    fn link_user(&self, cmd: LinkUserCmd) -> Result<Account, AccountCmdError> {
        let username = Username::new(&cmd.username);
        if username.is_empty() {
            return Err(AccountCmdError::Validation {
                field: "username",
                message: "username must not be empty".to_string(),
            });
        }

        let account = self
            .account_repo
            .find_by_id(&cmd.account_id)?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })?;
        let user = self
            .user_repo
            .find_one(|user| user.username() == &username)?
            .ok_or_else(|| AccountCmdError::UserNotFound { username: username.clone() })?;

        // 冲突检查（check-then-act）：任何写入之前完成。
        // 同一对 account/user 的重复链接是幂等的，不算冲突
        if let Some(linked) = user.linked_account() {
            if linked != cmd.account_id {
                return Err(AccountCmdError::UserAlreadyLinked { username });
            }
        }
        if let Some(link) = account.user() {
            if link.id != Some(user.id()) {
                return Err(AccountCmdError::AccountAlreadyLinked { id: cmd.account_id });
            }
        }

        // 两次独立的单文档写入，无跨文档事务
        let user_id = user.id();
        let full_name = account.full_name();
        let link_username = username.clone();
        let updated_account = self
            .account_repo
            .find_by_id_and_update(&cmd.account_id, move |account| {
                account.link_user(user_id, link_username)
            })?;
        self.user_repo.find_by_id_and_update(&user_id, move |user| {
            user.link_account(cmd.account_id, full_name)
        })?;

        updated_account.ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    fn unlink_user(&self, cmd: UnlinkUserCmd) -> Result<Account, AccountCmdError> {
        let account = self
            .account_repo
            .find_by_id(&cmd.account_id)?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })?;

        // 自愈短路：账户侧没有可用的用户ID时，只清账户侧的链接状态，
        // 不做任何用户查找。该分支优先于 user-not-found 错误路径
        let Some(user_id) = account.linked_user() else {
            if account.user().is_some() {
                tracing::warn!("account {} carries a partial user link, clearing", cmd.account_id);
            }
            return self
                .account_repo
                .find_by_id_and_update(&cmd.account_id, |account| account.clear_user_link())?
                .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id });
        };

        // 链接指向的用户必须存在，否则按完整性问题报 NotFound
        self.user_repo
            .find_by_id(&user_id)?
            .ok_or(AccountCmdError::LinkedUserMissing { id: user_id })?;

        // 两次独立写入清除双侧链接，与建链相同的无事务语义
        let updated_account = self
            .account_repo
            .find_by_id_and_update(&cmd.account_id, |account| account.clear_user_link())?;
        self.user_repo.find_by_id_and_update(&user_id, |user| user.unlink_account())?;

        updated_account.ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    // ==================== 备注与状态 ====================

    fn add_note(&self, cmd: AddNoteCmd) -> Result<Account, AccountCmdError> {
        let note = NoteEntry::new(cmd.data, cmd.admin, Timestamp::now_as_millis())?;
        self.account_repo
            .find_by_id_and_update(&cmd.account_id, move |account| account.push_note(note))?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    fn set_status(&self, cmd: SetStatusCmd) -> Result<Account, AccountCmdError> {
        let status = self
            .status_repo
            .find_by_id(&cmd.status)?
            .ok_or(AccountCmdError::StatusNotFound { id: cmd.status.clone() })?;
        let entry = StatusEntry::new(
            status.id.clone(),
            status.name.clone(),
            cmd.admin,
            Timestamp::now_as_millis(),
        )?;

        // current 与 log 末尾在同一次文档写入中一起更新
        self.account_repo
            .find_by_id_and_update(&cmd.account_id, move |account| account.set_status(entry))?
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    // ==================== 分页列表 ====================

    fn paged_list(&self, cmd: PagedListCmd) -> Result<PageResult<Account>, AccountCmdError> {
        // 排序字段与分页边界都在查询之前校验
        let sort = SortSpec::parse(&cmd.sort)?;
        let page_req = PageRequest::new(cmd.page, cmd.limit)?;

        Ok(self.account_repo.find_paged(|_| true, sort.comparator(), page_req)?)
    }

    // ==================== 本人账户 ====================

    fn get_my(&self, cmd: GetMyCmd) -> Result<MyAccountView, AccountCmdError> {
        self.account_repo
            .find_by_id(&cmd.account_id)?
            .map(MyAccountView::from)
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }

    fn update_my(&self, cmd: UpdateMyCmd) -> Result<MyAccountView, AccountCmdError> {
        let name = cmd.name.into_name()?;
        self.account_repo
            .find_by_id_and_update(&cmd.account_id, |account| account.set_name(name))?
            .map(MyAccountView::from)
            .ok_or(AccountCmdError::AccountNotFound { id: cmd.account_id })
    }
}

impl<AR, UR, SR> Handler<AccountCmdAny, AccountResAny, AccountCmdError>
    for AccountServiceImpl<AR, UR, SR>
where
    AR: DocRepo<Account>,
    UR: DocRepo<User>,
    SR: DocRepo<Status>,
{
    async fn handle(&self, cmd: AccountCmdAny) -> Result<CmdResp<AccountResAny>, AccountCmdError> {
        let command_id = cmd.command_id();
        let result = match cmd {
            AccountCmdAny::Create(cmd) => AccountResAny::Account(self.create(cmd)?),
            AccountCmdAny::Get(cmd) => AccountResAny::Account(self.get(cmd)?),
            AccountCmdAny::Update(cmd) => AccountResAny::Account(self.update(cmd)?),
            AccountCmdAny::Delete(cmd) => AccountResAny::Deleted(self.delete(cmd)?),
            AccountCmdAny::LinkUser(cmd) => AccountResAny::Account(self.link_user(cmd)?),
            AccountCmdAny::UnlinkUser(cmd) => AccountResAny::Account(self.unlink_user(cmd)?),
            AccountCmdAny::AddNote(cmd) => AccountResAny::Account(self.add_note(cmd)?),
            AccountCmdAny::SetStatus(cmd) => AccountResAny::Account(self.set_status(cmd)?),
            AccountCmdAny::PagedList(cmd) => AccountResAny::Page(self.paged_list(cmd)?),
            AccountCmdAny::GetMy(cmd) => AccountResAny::My(self.get_my(cmd)?),
            AccountCmdAny::UpdateMy(cmd) => AccountResAny::My(self.update_my(cmd)?),
        };

        Ok(CmdResp::new(command_id, result))
    }
}
