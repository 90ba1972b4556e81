//! Platform payload mapping: Google generic objects and save tokens,
//! Apple `pass.json` documents, and per-club class templates.

pub mod apple_pass;
pub mod class_template;
pub mod google_object;
pub mod save_token;

pub use apple_pass::{build_apple_pass, AppleIdentifiers, ApplePass};
pub use class_template::{build_class_template, with_class_id, WalletClass};
pub use google_object::{build_generic_object, GenericObject, CARD_BACKGROUND_HEX};
pub use save_token::{SaveTokenClaims, SaveUrlSigner};
