use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Staff,
    Manager,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Manager => "manager",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "staff" => Some(Role::Staff),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub created_at: String,
}
