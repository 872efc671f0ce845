pub mod card;
pub mod solution;

pub use card::{format_answer, render_card, TaskCard};
pub use solution::{format_solution, SolutionBlock};
