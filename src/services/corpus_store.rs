//! 语料库存储 - 业务能力层
//!
//! 只负责"训练页面"的追加与读取，不关心流程。
//! 追加即落盘（write-through），append 返回后崩溃不丢数据

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::TrainingPage;

/// 语料库存储
///
/// 职责：
/// - 持有按插入顺序排列的训练页面序列
/// - 启动时从持久化文件反序列化，文件缺失或损坏时从空序列开始
/// - 每次 append 都把完整序列写回文件
/// - 不做去重，不做删除
pub struct CorpusStore {
    path: PathBuf,
    pages: Vec<TrainingPage>,
}

impl CorpusStore {
    /// 从持久化文件加载语料库
    ///
    /// 加载失败不是致命错误：记录告警后以空语料库继续
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let pages = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<Vec<TrainingPage>>(&raw) {
                Ok(pages) => {
                    debug!("从 {:?} 加载了 {} 个训练页面", path, pages.len());
                    pages
                }
                Err(e) => {
                    warn!("⚠️ 语料文件损坏，将从空语料库开始: {}", e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, pages }
    }

    /// 追加一个训练页面并立即落盘
    pub async fn append(&mut self, page: TrainingPage) -> Result<()> {
        self.pages.push(page);
        self.persist().await
    }

    /// 全部训练页面（插入顺序）
    pub fn all(&self) -> &[TrainingPage] {
        &self.pages
    }

    /// 页面数量
    pub fn count(&self) -> usize {
        self.pages.len()
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.pages).map_err(StoreError::Serde)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(StoreError::Io)?;
        debug!("语料库已写回 {:?}（{} 个页面）", self.path, self.pages.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

    fn temp_corpus_path() -> PathBuf {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "training-copilot-corpus-{}-{}.json",
            std::process::id(),
            id
        ))
    }

    fn page(url: &str) -> TrainingPage {
        TrainingPage::new(url, "测试页面", "页面正文")
    }

    #[tokio::test]
    async fn capture_twice_appends_two_entries() {
        let path = temp_corpus_path();
        let mut store = CorpusStore::load(&path).await;
        let before = store.count();

        store.append(page("http://a")).await.unwrap();
        store.append(page("http://a")).await.unwrap();

        assert_eq!(store.count(), before + 2);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn append_survives_reload() {
        let path = temp_corpus_path();
        {
            let mut store = CorpusStore::load(&path).await;
            store.append(page("http://persisted")).await.unwrap();
        }

        let store = CorpusStore::load(&path).await;
        assert_eq!(store.count(), 1);
        assert_eq!(store.all()[0].url, "http://persisted");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_empty() {
        let path = temp_corpus_path();
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let store = CorpusStore::load(&path).await;
        assert_eq!(store.count(), 0);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn insertion_order_is_preserved() {
        let path = temp_corpus_path();
        let mut store = CorpusStore::load(&path).await;
        store.append(page("http://first")).await.unwrap();
        store.append(page("http://second")).await.unwrap();

        let urls: Vec<&str> = store.all().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["http://first", "http://second"]);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
