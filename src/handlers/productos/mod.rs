pub mod amount;
pub mod categories;
pub mod create;
pub mod list;
pub mod name;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use list::get as list_get;
pub use create::post as create_post;
pub use categories::get as categories_get;

pub use record::get as record_get;
pub use record::put as record_put;
pub use record::patch as record_patch;
pub use record::delete as record_delete;

pub use amount::greater_than as amount_greater_than;
pub use amount::less_than as amount_less_than;
pub use amount::range as amount_range;
pub use name::get as name_get;
