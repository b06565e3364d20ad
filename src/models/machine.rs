use serde::Serialize;

pub type MachineId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
}
