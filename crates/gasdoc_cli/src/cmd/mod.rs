/// Schema-driven buffer decode command.
pub mod decode;
/// Instruction payload encode command.
pub mod encode;
/// Instruction payload decode command.
pub mod instruction;
/// Schema listing command.
pub mod schema;
/// Gas-station account state command.
pub mod state;
mod util;
