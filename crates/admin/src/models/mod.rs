//! Domain models for the admin dashboard.

pub mod admin;
pub mod help_doc;
pub mod lookup;
pub mod matching;
pub mod member;
pub mod message;
pub mod payment;
pub mod registry;
pub mod session;
pub mod support;

pub use admin::{AdminProfile, Authority, Privilege, PrivilegeGrant, has_privilege};
pub use help_doc::HelpDocument;
pub use lookup::{BannedCountry, BannedIp, LookupEntry, LookupKind};
pub use matching::TestMatch;
pub use member::{Member, MemberUpdate};
pub use message::GlobalMessage;
pub use payment::{Payment, PaymentStats};
pub use registry::{RegistryEntry, RegistryUpdate};
pub use session::{CurrentAdmin, keys as session_keys};
pub use support::{SupportTicket, TicketResponse};
