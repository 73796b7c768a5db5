mod memory;
mod snapshot;

pub use memory::InMemoryHost;
pub use snapshot::{load_states, load_states_file};
