use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// 可持久化文档
///
/// 文档以主键寻址；嵌入的子文档随整个文档一起读写，
/// 不单独寻址
pub trait Doc: Clone + Send + Sync + 'static {
    /// 文档主键类型
    type Id: Clone + Ord + Send + Sync + fmt::Debug + fmt::Display;

    /// 文档主键
    fn id(&self) -> Self::Id;
}

/// 文档仓储接口
///
/// 对外只暴露按主键的 CRUD 和过滤/排序/分页查询；
/// 单文档更新在仓储内部原子地应用（更新闭包在集合锁内执行），
/// 跨文档不提供任何事务语义
///
/// # 设计原则
/// - 遵循领域驱动设计（DDD）：查询方法返回领域对象
/// - 接口隐藏实现细节：调用方无需关心数据存储位置
/// - 可测试性优先：支持内存实现用于单元测试
pub trait DocRepo<E: Doc>: Send + Sync {
    /// 插入新文档，主键冲突返回 DuplicateId
    fn insert(&self, doc: E) -> Result<E, RepoError>;

    /// 按主键查询单个文档
    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepoError>;

    /// 按条件查询单个文档（多个匹配时返回主键序的第一个）
    fn find_one(&self, filter: impl Fn(&E) -> bool) -> Result<Option<E>, RepoError>;

    /// 按主键原子更新单个文档，返回更新后的文档
    ///
    /// 更新闭包对同一文档的多处修改属于同一次写入
    fn find_by_id_and_update(
        &self,
        id: &E::Id,
        update: impl FnOnce(&mut E),
    ) -> Result<Option<E>, RepoError>;

    /// 按主键删除单个文档，返回被删除的文档
    fn find_by_id_and_delete(&self, id: &E::Id) -> Result<Option<E>, RepoError>;

    /// 条件 + 排序 + 分页查询
    ///
    /// 超出数据范围的页返回空页，不报错
    fn find_paged(
        &self,
        filter: impl Fn(&E) -> bool,
        sort: impl Fn(&E, &E) -> Ordering,
        page_req: PageRequest,
    ) -> Result<PageResult<E>, RepoError>;

    /// 符合条件的文档总数
    fn count(&self, filter: impl Fn(&E) -> bool) -> Result<u64, RepoError>;
}

impl<E: Doc, R: DocRepo<E>> DocRepo<E> for Arc<R> {
    fn insert(&self, doc: E) -> Result<E, RepoError> {
        (**self).insert(doc)
    }

    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepoError> {
        (**self).find_by_id(id)
    }

    fn find_one(&self, filter: impl Fn(&E) -> bool) -> Result<Option<E>, RepoError> {
        (**self).find_one(filter)
    }

    fn find_by_id_and_update(
        &self,
        id: &E::Id,
        update: impl FnOnce(&mut E),
    ) -> Result<Option<E>, RepoError> {
        (**self).find_by_id_and_update(id, update)
    }

    fn find_by_id_and_delete(&self, id: &E::Id) -> Result<Option<E>, RepoError> {
        (**self).find_by_id_and_delete(id)
    }

    fn find_paged(
        &self,
        filter: impl Fn(&E) -> bool,
        sort: impl Fn(&E, &E) -> Ordering,
        page_req: PageRequest,
    ) -> Result<PageResult<E>, RepoError> {
        (**self).find_paged(filter, sort, page_req)
    }

    fn count(&self, filter: impl Fn(&E) -> bool) -> Result<u64, RepoError> {
        (**self).count(filter)
    }
}

/// 分页参数
///
/// 页号为 1-based，页号与每页条数都限制在 [1, 1000]
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageRequest {
    /// 分页号（1-based，第一页为 1）
    pub page: u64,
    /// 每页记录数
    pub limit: u64,
}

impl PageRequest {
    pub const MIN_PAGE: u64 = 1;
    pub const MAX_PAGE: u64 = 1000;
    pub const MIN_LIMIT: u64 = 1;
    pub const MAX_LIMIT: u64 = 1000;

    /// 创建新的分页请求，越界返回 InvalidPageRequest
    pub fn new(page: u64, limit: u64) -> Result<Self, RepoError> {
        if !(Self::MIN_PAGE..=Self::MAX_PAGE).contains(&page) {
            return Err(RepoError::InvalidPageRequest {
                field: "page",
                value: page,
                min: Self::MIN_PAGE,
                max: Self::MAX_PAGE,
            });
        }
        if !(Self::MIN_LIMIT..=Self::MAX_LIMIT).contains(&limit) {
            return Err(RepoError::InvalidPageRequest {
                field: "limit",
                value: limit,
                min: Self::MIN_LIMIT,
                max: Self::MAX_LIMIT,
            });
        }

        Ok(Self { page, limit })
    }

    /// 获取OFFSET值（跳过的记录数）
    #[inline]
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={}, limit={}", self.page, self.limit)
    }
}

/// 分页结果
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// 当前页的数据
    pub content: Vec<T>,
    /// 符合条件的总记录数
    pub total_elements: u64,
    /// 当前页号（1-based）
    pub page: u64,
    /// 每页记录数
    pub limit: u64,
}

impl<T> PageResult<T> {
    /// 创建新的分页结果
    pub fn new(content: Vec<T>, total_elements: u64, page: u64, limit: u64) -> Self {
        Self { content, total_elements, page, limit }
    }

    /// 获取总分页数
    #[inline]
    pub fn total_pages(&self) -> u64 {
        (self.total_elements + self.limit - 1) / self.limit
    }

    /// 当前页的元素数
    #[inline]
    pub fn page_elements(&self) -> u64 {
        self.content.len() as u64
    }

    /// 是否有下一页
    #[inline]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 是否有上一页
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 转换分页结果的数据类型
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// 仓储错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// 主键冲突
    #[error("document already exists: {id}")]
    DuplicateId { id: String },
    /// 分页参数越界
    #[error("invalid page request: {field}={value}, allowed [{min}, {max}]")]
    InvalidPageRequest { field: &'static str, value: u64, min: u64, max: u64 },
    /// 存储后端故障
    #[error("storage backend failure: {message}")]
    Backend { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(1, 20).is_ok());
        assert!(PageRequest::new(1000, 1000).is_ok());
        assert!(PageRequest::new(0, 20).is_err());
        assert!(PageRequest::new(1001, 20).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 1001).is_err());
    }

    #[test]
    fn page_request_offset_is_one_based() {
        let page_req = PageRequest::new(2, 20).unwrap();
        assert_eq!(page_req.offset(), 20);
        assert_eq!(PageRequest::new(1, 20).unwrap().offset(), 0);
    }

    #[test]
    fn page_result_metadata() {
        let result = PageResult::new(vec![1, 2, 3, 4, 5], 45, 3, 20);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.page_elements(), 5);
        assert!(!result.has_next());
        assert!(result.has_previous());
    }
}
