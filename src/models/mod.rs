pub mod request;
pub mod task;
pub mod task_type;

pub use request::{FormInput, GenerationRequest, MAX_COUNT, MIN_COUNT};
pub use task::{Difficulty, GenerationResponse, Task};
pub use task_type::TaskType;
