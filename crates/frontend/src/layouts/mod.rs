mod admin;
mod member;
mod nav;

pub use admin::AdminLayout;
pub use member::MemberLayout;
