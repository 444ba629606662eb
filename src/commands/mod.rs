// GroupSwap Command Modules
//
// Each sub-module is a thin command wrapper for a UI.
// Heavy logic lives in engine/; these modules only
// delegate and turn errors into display strings.

pub mod state;
pub mod trade;
pub mod assets;
