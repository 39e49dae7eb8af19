pub mod dom;
pub mod question;
pub mod status;
pub mod training_page;

pub use dom::{ControlAttrs, ControlKind, ControlTree, SnapshotNode};
pub use question::{AnswerMode, ControlSurface, OptionHandle, Question};
pub use status::{Status, StatusCell};
pub use training_page::TrainingPage;
