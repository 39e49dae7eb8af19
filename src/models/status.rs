use std::fmt;
use std::sync::{Arc, Mutex};

/// 面板状态指示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Processing,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Processing => write!(f, "Processing…"),
            Status::Error => write!(f, "Error"),
        }
    }
}

/// 可观察的状态单元
///
/// 推理客户端写入，展示层读取；克隆共享同一底层状态
#[derive(Debug, Clone, Default)]
pub struct StatusCell(Arc<Mutex<Status>>);

impl StatusCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, status: Status) {
        if let Ok(mut cell) = self.0.lock() {
            *cell = status;
        }
    }

    pub fn get(&self) -> Status {
        self.0.lock().map(|cell| *cell).unwrap_or(Status::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let cell = StatusCell::new();
        let observer = cell.clone();
        assert_eq!(observer.get(), Status::Ready);
        cell.set(Status::Processing);
        assert_eq!(observer.get(), Status::Processing);
        cell.set(Status::Error);
        assert_eq!(observer.get(), Status::Error);
    }
}
