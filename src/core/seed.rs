//! Fixed seed data supplied on first run, before anything has been saved

use chrono::NaiveDate;

use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::{AuthorizedUser, Mold, RepairLog, Role, SparePart, ToolStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Initial mold inventory
pub fn seed_molds() -> Vec<Mold> {
    let phone_case = EntityId::new(EntityPrefix::Mold);
    let bottle_cap = EntityId::new(EntityPrefix::Mold);
    let chair_base = EntityId::new(EntityPrefix::Mold);

    vec![
        Mold {
            id: phone_case.clone(),
            name: "Корпус Телефон A1".to_string(),
            serial_number: "MOLD-2023-001".to_string(),
            manufacturer: "Hasco Solutions".to_string(),
            total_shots: 154_200,
            cavities: 4,
            status: ToolStatus::Active,
            repair_history: vec![RepairLog {
                id: EntityId::new(EntityPrefix::Rep),
                mold_id: phone_case,
                mold_name: "Корпус Телефон A1".to_string(),
                date: date(2023, 11, 15),
                technician: "Иван Иванов".to_string(),
                description: "Смяна на изхвъргачи и почистване на въздушници".to_string(),
                parts_replaced: vec!["Изхвъргач 12мм - 4бр".to_string()],
                duration_hours: 6.0,
                cost: None,
            }],
            image: None,
        },
        Mold {
            id: bottle_cap,
            name: "Капачка Бутилка V2".to_string(),
            serial_number: "MOLD-2022-452".to_string(),
            manufacturer: "DME Europe".to_string(),
            total_shots: 890_000,
            cavities: 16,
            status: ToolStatus::Active,
            repair_history: Vec::new(),
            image: None,
        },
        Mold {
            id: chair_base.clone(),
            name: "Основа Стол Б-12".to_string(),
            serial_number: "MOLD-2021-112".to_string(),
            manufacturer: "Meusburger".to_string(),
            total_shots: 45_000,
            cavities: 1,
            status: ToolStatus::InRepair,
            repair_history: vec![RepairLog {
                id: EntityId::new(EntityPrefix::Rep),
                mold_id: chair_base,
                mold_name: "Основа Стол Б-12".to_string(),
                date: date(2024, 2, 1),
                technician: "Петър Петров".to_string(),
                description: "Ремонт на горещи канали - теч на материал".to_string(),
                parts_replaced: vec!["Дюза тип 2".to_string(), "Нагревател".to_string()],
                duration_hours: 12.0,
                cost: None,
            }],
            image: None,
        },
    ]
}

/// Initial spare-part stock
pub fn seed_parts() -> Vec<SparePart> {
    vec![
        SparePart {
            id: EntityId::new(EntityPrefix::Part),
            name: "Изхвъргач 12мм".to_string(),
            sku: "EJ-12-HASCO".to_string(),
            quantity: 24,
            min_quantity: 10,
            location: "Шкаф A1".to_string(),
        },
        SparePart {
            id: EntityId::new(EntityPrefix::Part),
            name: "Нагревател Дюза".to_string(),
            sku: "HEAT-NZL-40".to_string(),
            quantity: 5,
            min_quantity: 2,
            location: "Шкаф B2".to_string(),
        },
        SparePart {
            id: EntityId::new(EntityPrefix::Part),
            name: "О-пръстен Viton 10x2".to_string(),
            sku: "OR-102-V".to_string(),
            quantity: 150,
            min_quantity: 50,
            location: "Кутия 12".to_string(),
        },
    ]
}

/// The permanent admin roster used until a stored roster exists
pub fn seed_users() -> Vec<AuthorizedUser> {
    let entry = |email: &str, added: NaiveDate| AuthorizedUser {
        id: EntityId::new(EntityPrefix::User),
        email: email.to_string(),
        role: Role::Admin,
        added_at: added,
    };

    vec![
        entry("petar.simeonov@gotmar.com", date(2024, 5, 20)),
        entry("delyan.nedev@gotmar.com", date(2024, 5, 20)),
        entry("todor.zhelyazkov@gotmar.com", date(2024, 3, 20)),
        entry("admin@moldmaster.pro", date(2023, 10, 1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_molds_reference_their_own_ids() {
        for mold in seed_molds() {
            for repair in &mold.repair_history {
                assert_eq!(repair.mold_id, mold.id);
                assert_eq!(repair.mold_name, mold.name);
            }
        }
    }

    #[test]
    fn test_seed_counts() {
        assert_eq!(seed_molds().len(), 3);
        assert_eq!(seed_parts().len(), 3);
        assert_eq!(seed_users().len(), 4);
    }

    #[test]
    fn test_seed_roster_is_all_admin() {
        assert!(seed_users().iter().all(|u| u.role == Role::Admin));
    }
}
