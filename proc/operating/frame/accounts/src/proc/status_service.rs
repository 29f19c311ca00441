//! 状态目录服务实现

use base_types::account::status::Status;
use base_types::cqrs::cqrs_types::CmdResp;
use base_types::handler::handler::Handler;
use doc_repo::{Doc, DocRepo, PageRequest, PageResult, RepoError};

use crate::proc::behavior::status_behavior::{
    CreateStatusCmd, GetStatusCmd, PagedStatusListCmd, StatusCmdAny, StatusCmdError, StatusResAny,
};

/// 状态目录服务
///
/// 目录行的维护入口；账户服务对目录只读
pub struct StatusCatalogImpl<SR: DocRepo<Status>> {
    status_repo: SR,
}

impl<SR: DocRepo<Status>> StatusCatalogImpl<SR> {
    pub fn new(status_repo: SR) -> Self {
        Self { status_repo }
    }

    fn create(&self, cmd: CreateStatusCmd) -> Result<Status, StatusCmdError> {
        let status = Status::new(&cmd.name)?;
        let id = status.id.clone();
        match self.status_repo.insert(status) {
            Ok(status) => {
                tracing::info!("status '{}' added to catalog", status.id);
                Ok(status)
            }
            Err(RepoError::DuplicateId { .. }) => Err(StatusCmdError::DuplicateStatus { id }),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, cmd: GetStatusCmd) -> Result<Status, StatusCmdError> {
        self.status_repo
            .find_by_id(&cmd.status_id)?
            .ok_or(StatusCmdError::StatusNotFound { id: cmd.status_id })
    }

    fn paged_list(&self, cmd: PagedStatusListCmd) -> Result<PageResult<Status>, StatusCmdError> {
        let page_req = PageRequest::new(cmd.page, cmd.limit)?;

        Ok(self.status_repo.find_paged(|_| true, |a, b| a.id().cmp(&b.id()), page_req)?)
    }
}

impl<SR: DocRepo<Status>> Handler<StatusCmdAny, StatusResAny, StatusCmdError>
    for StatusCatalogImpl<SR>
{
    async fn handle(&self, cmd: StatusCmdAny) -> Result<CmdResp<StatusResAny>, StatusCmdError> {
        let command_id = cmd.command_id();
        let result = match cmd {
            StatusCmdAny::Create(cmd) => StatusResAny::Status(self.create(cmd)?),
            StatusCmdAny::Get(cmd) => StatusResAny::Status(self.get(cmd)?),
            StatusCmdAny::PagedList(cmd) => StatusResAny::Page(self.paged_list(cmd)?),
        };

        Ok(CmdResp::new(command_id, result))
    }
}
