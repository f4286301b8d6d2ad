pub mod theft_handler;

pub use theft_handler::{
    __path_list_active_zones, __path_submit_theft, list_active_zones, submit_theft,
};
