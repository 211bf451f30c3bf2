//! Built-in records shown before (or instead of) any external data

use crate::models::Official;

struct SeedEntry {
    id: &'static str,
    name: &'static str,
    position: &'static str,
    department: &'static str,
    category: &'static str,
    email: &'static str,
    phone: &'static str,
    whatsapp: &'static str,
    term: &'static str,
    location: &'static str,
    rank: i64,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "alc-01",
        name: "Guillermo Morales Sanchez",
        position: "Alcalde Distrital",
        department: "Despacho de Alcaldía",
        category: "Autoridades Ediles",
        email: "alcaldia@munismf.gob.pe",
        phone: "073-000000",
        whatsapp: "+51900000000",
        term: "2023 – 2026",
        location: "Palacio Municipal, 2° piso",
        rank: 1,
    },
    SeedEntry {
        id: "gm-01",
        name: "Econ. Lucero Xixa Rodríguez Gonzales",
        position: "Gerente Municipal",
        department: "Gerencia Municipal",
        category: "Alta Dirección",
        email: "gerenciamunicipal@munismf.gob.pe",
        phone: "073-000010",
        whatsapp: "+51900000010",
        term: "2025",
        location: "Palacio Municipal, 2° piso",
        rank: 2,
    },
    SeedEntry {
        id: "gdsysm-01",
        name: "Pedro Augusto Ramírez Neira",
        position: "Gerente de Desarrollo Social y Servicios Municipales",
        department: "GDSySM",
        category: "Gerencias y Subgerencias",
        email: "gdsysm@munismf.gob.pe",
        phone: "073-000020",
        whatsapp: "+51973714680",
        term: "2025",
        location: "Palacio Municipal, 2° piso",
        rank: 3,
    },
];

/// The built-in record set
pub fn seed_records() -> Vec<Official> {
    SEED.iter()
        .map(|entry| Official {
            id: Some(entry.id.to_string()),
            name: Some(entry.name.to_string()),
            position: Some(entry.position.to_string()),
            department: Some(entry.department.to_string()),
            category: Some(entry.category.to_string()),
            email: Some(entry.email.to_string()),
            phone: Some(entry.phone.to_string()),
            whatsapp: Some(entry.whatsapp.to_string()),
            photo: Some(String::new()),
            term: Some(entry.term.to_string()),
            location: Some(entry.location.to_string()),
            rank: Some(entry.rank),
            extra: Default::default(),
        })
        .collect()
}
