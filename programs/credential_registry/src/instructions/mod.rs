// Instruction handlers, one module per instruction
pub mod initialize;
pub mod add_credential;
pub mod revoke_credential;
pub mod verify_credential;

// Re-export instruction account contexts
pub use initialize::*;
pub use add_credential::*;
pub use revoke_credential::*;
pub use verify_credential::*;
