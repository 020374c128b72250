//! Pet Entity
//!
//! An adoptable animal published by a shelter. Field names mirror the
//! backend wire format; optional attributes stay optional because older
//! records omit them.

use super::entity::{Entity, ItemId};
use super::wire;
use serde::{Deserialize, Serialize};

/// Approximate size class of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetSize {
    #[serde(rename = "PEQUENO")]
    Small,
    #[serde(rename = "MEDIANO")]
    Medium,
    #[serde(rename = "GRANDE")]
    Large,
    #[serde(rename = "GIGANTE")]
    Giant,
}

impl PetSize {
    /// Wire code used by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            PetSize::Small => "PEQUENO",
            PetSize::Medium => "MEDIANO",
            PetSize::Large => "GRANDE",
            PetSize::Giant => "GIGANTE",
        }
    }

    /// Human-readable label shown in listings
    pub fn label(&self) -> &'static str {
        match self {
            PetSize::Small => "Pequeño",
            PetSize::Medium => "Mediano",
            PetSize::Large => "Grande",
            PetSize::Giant => "Gigante",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PEQUENO" => Some(PetSize::Small),
            "MEDIANO" => Some(PetSize::Medium),
            "GRANDE" => Some(PetSize::Large),
            "GIGANTE" => Some(PetSize::Giant),
            _ => None,
        }
    }
}

/// Age bracket of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetAge {
    #[serde(rename = "CACHORRO")]
    Puppy,
    #[serde(rename = "JOVEN")]
    Young,
    #[serde(rename = "ADULTO")]
    Adult,
    #[serde(rename = "SENIOR")]
    Senior,
}

impl PetAge {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetAge::Puppy => "CACHORRO",
            PetAge::Young => "JOVEN",
            PetAge::Adult => "ADULTO",
            PetAge::Senior => "SENIOR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PetAge::Puppy => "Cachorro",
            PetAge::Young => "Joven",
            PetAge::Adult => "Adulto",
            PetAge::Senior => "Senior",
        }
    }
}

/// Required activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLevel {
    #[serde(rename = "BAJA")]
    Low,
    #[serde(rename = "MEDIA")]
    Medium,
    #[serde(rename = "ALTA")]
    High,
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "BAJA",
            EnergyLevel::Medium => "MEDIA",
            EnergyLevel::High => "ALTA",
        }
    }
}

/// Publication state of a pet record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PetStatus {
    #[default]
    #[serde(rename = "DISPONIBLE")]
    Available,
    #[serde(rename = "RESERVADO")]
    Reserved,
    #[serde(rename = "ADOPTADO")]
    Adopted,
    #[serde(rename = "BORRADOR")]
    Draft,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "DISPONIBLE",
            PetStatus::Reserved => "RESERVADO",
            PetStatus::Adopted => "ADOPTADO",
            PetStatus::Draft => "BORRADOR",
        }
    }
}

/// An adoptable animal as served by the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Species label resolved by the backend ("Perro", "Gato", ...)
    #[serde(rename = "tipo_animal_nombre", default)]
    pub species: Option<String>,
    /// Breed label, absent for mixed or unknown breeds
    #[serde(rename = "raza_nombre", default)]
    pub breed: Option<String>,
    /// "MACHO" or "HEMBRA"
    #[serde(rename = "sexo", default)]
    pub sex: Option<String>,
    /// Age bracket
    #[serde(rename = "edad", default, deserialize_with = "wire::lenient")]
    pub age: Option<PetAge>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Size class, blank in older records
    #[serde(rename = "tamano", default, deserialize_with = "wire::lenient")]
    pub size: Option<PetSize>,
    /// Predominant coat color, free-form
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "nivel_energia", default, deserialize_with = "wire::lenient")]
    pub energy: Option<EnergyLevel>,
    #[serde(rename = "esterilizado", default)]
    pub sterilized: bool,
    #[serde(rename = "desparasitado", default)]
    pub dewormed: bool,
    #[serde(default)]
    pub microchip: bool,
    /// Shelter display name
    #[serde(rename = "refugio_nombre", default)]
    pub shelter: Option<String>,
    #[serde(rename = "refugio_ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "refugio_region", default)]
    pub region: Option<String>,
    /// Main photo URL
    #[serde(rename = "foto_principal", default)]
    pub photo: Option<String>,
    #[serde(rename = "foto_2", default)]
    pub photo_2: Option<String>,
    #[serde(rename = "foto_3", default)]
    pub photo_3: Option<String>,
    #[serde(rename = "estado", default, deserialize_with = "wire::lenient_or_default")]
    pub status: PetStatus,
    #[serde(rename = "fecha_ingreso", default, deserialize_with = "wire::lenient")]
    pub admitted_on: Option<chrono::NaiveDate>,
}

impl Pet {
    /// Whether the record may be shown to adopters
    pub fn is_available(&self) -> bool {
        self.status == PetStatus::Available
    }
}

impl Entity for Pet {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_codes_round_trip() {
        assert_eq!(PetSize::Small.as_str(), "PEQUENO");
        assert_eq!(PetSize::from_str("GIGANTE"), Some(PetSize::Giant));
        assert_eq!(PetSize::from_str("grande"), None);
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(PetSize::Small.label(), "Pequeño");
        assert_eq!(PetSize::Giant.label(), "Gigante");
    }

    #[test]
    fn test_pet_decodes_with_missing_optionals() {
        let raw = r#"{"id": 3, "nombre": "Luna", "descripcion": "Tranquila"}"#;
        let pet: Pet = serde_json::from_str(raw).expect("decode");
        assert_eq!(pet.id(), 3);
        assert_eq!(pet.name, "Luna");
        assert!(pet.breed.is_none());
        assert!(pet.size.is_none());
        assert!(pet.is_available());
    }

    #[test]
    fn test_pet_tolerates_blank_choice_fields() {
        let raw = r#"{"id": 4, "nombre": "Mia", "descripcion": "x", "tamano": "", "nivel_energia": ""}"#;
        let pet: Pet = serde_json::from_str(raw).expect("decode");
        assert!(pet.size.is_none());
        assert!(pet.energy.is_none());
    }

    #[test]
    fn test_pet_decodes_wire_enums() {
        let raw = r#"{
            "id": 9,
            "nombre": "Rocky",
            "descripcion": "",
            "tamano": "GRANDE",
            "edad": "SENIOR",
            "nivel_energia": "BAJA",
            "estado": "RESERVADO"
        }"#;
        let pet: Pet = serde_json::from_str(raw).expect("decode");
        assert_eq!(pet.size, Some(PetSize::Large));
        assert_eq!(pet.age, Some(PetAge::Senior));
        assert_eq!(pet.energy, Some(EnergyLevel::Low));
        assert!(!pet.is_available());
    }
}
