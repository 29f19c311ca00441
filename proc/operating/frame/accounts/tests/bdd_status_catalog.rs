//! BDD测试 - 状态目录维护

use std::sync::Arc;

use account_behavior::proc::behavior::account_behavior::ErrorKind;
use account_behavior::proc::behavior::status_behavior::{
    CreateStatusCmd, GetStatusCmd, PagedStatusListCmd, StatusCmdAny, StatusCmdError, StatusResAny,
};
use account_behavior::proc::status_service::StatusCatalogImpl;
use base_types::account::status::Status;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::handler::handler::Handler;
use base_types::StatusId;
use doc_repo::MemDocRepo;

type Catalog = StatusCatalogImpl<Arc<MemDocRepo<Status>>>;

fn catalog() -> Catalog {
    StatusCatalogImpl::new(Arc::new(MemDocRepo::new()))
}

async fn create(catalog: &Catalog, name: &str) -> Result<Status, StatusCmdError> {
    let resp = catalog
        .handle(StatusCmdAny::Create(CreateStatusCmd {
            metadata: CMetadata::default(),
            name: name.to_string(),
        }))
        .await?;
    match resp.result {
        StatusResAny::Status(status) => Ok(status),
        other => panic!("expected status, got {:?}", other),
    }
}

#[tokio::test]
async fn scenario_create_derives_id_and_rejects_duplicates() {
    // Given / When: 新建 "On Hold"
    let catalog = catalog();
    let status = create(&catalog, "On Hold").await.unwrap();

    // Then: ID 从名字派生
    assert_eq!(status.id.as_str(), "on-hold");

    // 同名再次创建 -> Conflict
    let err = create(&catalog, "On Hold").await.unwrap_err();
    assert!(matches!(err, StatusCmdError::DuplicateStatus { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // 空名 -> Validation
    let err = create(&catalog, "  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn scenario_get_and_paged_list() {
    let catalog = catalog();
    for name in ["Happy", "On Hold", "Closed"] {
        create(&catalog, name).await.unwrap();
    }

    let resp = catalog
        .handle(StatusCmdAny::Get(GetStatusCmd {
            metadata: CMetadata::default(),
            status_id: StatusId::new("happy"),
        }))
        .await
        .unwrap();
    let StatusResAny::Status(status) = resp.result else { panic!("expected status") };
    assert_eq!(status.name, "Happy");

    let err = catalog
        .handle(StatusCmdAny::Get(GetStatusCmd {
            metadata: CMetadata::default(),
            status_id: StatusId::new("missing"),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // 列表按 _id 升序
    let resp = catalog
        .handle(StatusCmdAny::PagedList(PagedStatusListCmd {
            metadata: CMetadata::default(),
            page: 1,
            limit: 20,
        }))
        .await
        .unwrap();
    let StatusResAny::Page(page) = resp.result else { panic!("expected page") };
    let ids: Vec<&str> = page.content.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["closed", "happy", "on-hold"]);
}
