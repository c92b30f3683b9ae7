pub mod static_access_list;

pub use static_access_list::StaticAccessList;
