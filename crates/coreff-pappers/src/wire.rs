//! Pappers API response shapes.
//!
//! Only the members the client reads are declared; everything else in a
//! response is kept in the raw payload.

use serde::{Deserialize, Deserializer};

use crate::types::{DirectorInfo, LookupResult};

/// `GET /v2/recherche`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub resultats: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub siren: Option<String>,
    pub nom_entreprise: Option<String>,
    pub siege: Address,
}

/// `GET /v2/entreprise?siren=`
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyResponse {
    pub nom_entreprise: Option<String>,
    pub numero_tva_intracommunautaire: Option<String>,
    pub etablissements: Vec<Establishment>,
}

/// `GET /v2/entreprise?siret=`
#[derive(Debug, Deserialize)]
pub(crate) struct EstablishmentResponse {
    pub nom_entreprise: Option<String>,
    pub numero_tva_intracommunautaire: Option<String>,
    pub etablissement: Address,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Establishment {
    #[serde(flatten)]
    pub address: Address,
    #[serde(deserialize_with = "present_flag")]
    pub siege: Option<bool>,
    #[serde(deserialize_with = "present_flag")]
    pub etablissement_cesse: Option<bool>,
}

impl Establishment {
    /// Open establishments are kept; with `head_office_only` only the head office.
    ///
    /// A `null` flag never matches, so such entries are dropped.
    pub fn is_selected(&self, head_office_only: bool) -> bool {
        (!head_office_only || self.siege == Some(true))
            && self.etablissement_cesse == Some(false)
    }
}

/// Flag that must be present but may be `null`.
fn present_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer)
}

#[derive(Debug, Deserialize)]
pub(crate) struct Address {
    pub siret: Option<String>,
    pub adresse_ligne_1: Option<String>,
    pub adresse_ligne_2: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub code_pays: Option<String>,
}

/// `GET /v2/entreprise?siret=` for the officer list
#[derive(Debug, Deserialize)]
pub(crate) struct DirectorsResponse {
    pub representants: Vec<Representative>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Representative {
    pub nom_complet: Option<String>,
    pub qualite: Option<String>,
    pub adresse_ligne_1: Option<String>,
    pub code_postal: Option<String>,
    pub ville: Option<String>,
}

impl From<Representative> for DirectorInfo {
    fn from(rep: Representative) -> Self {
        Self {
            name: rep.nom_complet,
            job: rep.qualite,
            street: rep.adresse_ligne_1,
            zip: rep.code_postal,
            city: rep.ville,
        }
    }
}

impl SearchHit {
    pub fn into_lookup(self, registry_data: String) -> LookupResult {
        LookupResult {
            company_code: self.siren,
            name: self.nom_entreprise,
            street: self.siege.adresse_ligne_1,
            street2: self.siege.adresse_ligne_2,
            city: self.siege.ville,
            zip: self.siege.code_postal,
            country_code: None,
            vat: None,
            registry_data,
        }
    }
}

impl Address {
    /// Establishment-level record carrying company-level name and VAT.
    pub fn into_lookup(
        self,
        name: Option<String>,
        vat: Option<String>,
        registry_data: String,
    ) -> LookupResult {
        LookupResult {
            company_code: self.siret,
            name,
            street: self.adresse_ligne_1,
            street2: self.adresse_ligne_2,
            city: self.ville,
            zip: self.code_postal,
            country_code: self.code_pays,
            vat,
            registry_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn establishment(siege: bool, cesse: bool) -> Establishment {
        serde_json::from_value(json!({
            "siret": "55210055400013",
            "siege": siege,
            "etablissement_cesse": cesse
        }))
        .expect("parse establishment")
    }

    #[test]
    fn test_establishment_selection() {
        assert!(establishment(true, false).is_selected(true));
        assert!(establishment(true, false).is_selected(false));
        assert!(establishment(false, false).is_selected(false));
        assert!(!establishment(false, false).is_selected(true));
        assert!(!establishment(true, true).is_selected(false));
        assert!(!establishment(false, true).is_selected(false));
    }

    #[test]
    fn test_establishment_null_flags_are_dropped() {
        let parsed: Establishment = serde_json::from_value(json!({
            "siret": "55210055400013",
            "siege": null,
            "etablissement_cesse": null
        }))
        .expect("null flags still parse");

        assert_eq!(parsed.siege, None);
        assert!(!parsed.is_selected(false));
        assert!(!parsed.is_selected(true));
    }

    #[test]
    fn test_establishment_requires_flags() {
        let parsed = serde_json::from_value::<Establishment>(json!({"siret": "55210055400013"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_representative_mapping() {
        let rep: Representative = serde_json::from_value(json!({
            "nom_complet": "Jeanne Martin",
            "qualite": "Présidente",
            "adresse_ligne_1": "1 rue de la Paix",
            "code_postal": "75002",
            "ville": "Paris",
            "date_prise_de_poste": "2020-01-01"
        }))
        .expect("parse representative");

        let director = DirectorInfo::from(rep);
        assert_eq!(director.name.as_deref(), Some("Jeanne Martin"));
        assert_eq!(director.job.as_deref(), Some("Présidente"));
        assert_eq!(director.street.as_deref(), Some("1 rue de la Paix"));
        assert_eq!(director.zip.as_deref(), Some("75002"));
        assert_eq!(director.city.as_deref(), Some("Paris"));
    }
}
