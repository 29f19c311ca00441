use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{Doc, DocRepo, PageRequest, PageResult, RepoError};

/// 基于内存的文档仓储实现
///
/// 每个集合一把锁；单文档更新闭包在锁内执行，等价于
/// 文档数据库的单文档原子写。BTreeMap 保证主键序遍历
pub struct MemDocRepo<E: Doc> {
    docs: Mutex<BTreeMap<E::Id, E>>,
}

impl<E: Doc> MemDocRepo<E> {
    pub fn new() -> Self {
        Self { docs: Mutex::new(BTreeMap::new()) }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<E::Id, E>>, RepoError> {
        self.docs
            .lock()
            .map_err(|_| RepoError::Backend { message: "poisoned collection lock".to_string() })
    }
}

impl<E: Doc> Default for MemDocRepo<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Doc> DocRepo<E> for MemDocRepo<E> {
    fn insert(&self, doc: E) -> Result<E, RepoError> {
        let mut docs = self.locked()?;
        let id = doc.id();
        if docs.contains_key(&id) {
            return Err(RepoError::DuplicateId { id: id.to_string() });
        }
        docs.insert(id, doc.clone());

        Ok(doc)
    }

    fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepoError> {
        Ok(self.locked()?.get(id).cloned())
    }

    fn find_one(&self, filter: impl Fn(&E) -> bool) -> Result<Option<E>, RepoError> {
        Ok(self.locked()?.values().find(|doc| filter(doc)).cloned())
    }

    fn find_by_id_and_update(
        &self,
        id: &E::Id,
        update: impl FnOnce(&mut E),
    ) -> Result<Option<E>, RepoError> {
        let mut docs = self.locked()?;
        match docs.get_mut(id) {
            Some(doc) => {
                update(doc);
                Ok(Some(doc.clone()))
            }
            None => Ok(None),
        }
    }

    fn find_by_id_and_delete(&self, id: &E::Id) -> Result<Option<E>, RepoError> {
        Ok(self.locked()?.remove(id))
    }

    fn find_paged(
        &self,
        filter: impl Fn(&E) -> bool,
        sort: impl Fn(&E, &E) -> Ordering,
        page_req: PageRequest,
    ) -> Result<PageResult<E>, RepoError> {
        let docs = self.locked()?;
        let mut matched: Vec<E> = docs.values().filter(|doc| filter(doc)).cloned().collect();
        drop(docs);

        matched.sort_by(|a, b| sort(a, b));

        let total = matched.len() as u64;
        let content: Vec<E> = matched
            .into_iter()
            .skip(page_req.offset() as usize)
            .take(page_req.limit as usize)
            .collect();

        Ok(PageResult::new(content, total, page_req.page, page_req.limit))
    }

    fn count(&self, filter: impl Fn(&E) -> bool) -> Result<u64, RepoError> {
        Ok(self.locked()?.values().filter(|doc| filter(doc)).count() as u64)
    }
}
