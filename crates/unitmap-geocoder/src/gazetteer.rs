//! Built-in list of Paraná municipalities used to admit bare city names.
//!
//! Covers the municipalities above roughly 30k inhabitants plus the regional
//! seats. Matching is accent- and case-insensitive.

use unitmap_core::text::tokens;

const PARANA_MUNICIPALITIES: &[&str] = &[
    "Almirante Tamandaré",
    "Apucarana",
    "Arapongas",
    "Araucária",
    "Assis Chateaubriand",
    "Bandeirantes",
    "Cambé",
    "Campo Largo",
    "Campo Mourão",
    "Castro",
    "Cascavel",
    "Cianorte",
    "Colombo",
    "Cornélio Procópio",
    "Curitiba",
    "Dois Vizinhos",
    "Fazenda Rio Grande",
    "Foz do Iguaçu",
    "Francisco Beltrão",
    "Guarapuava",
    "Guaratuba",
    "Ibiporã",
    "Irati",
    "Ivaiporã",
    "Jacarezinho",
    "Lapa",
    "Londrina",
    "Marechal Cândido Rondon",
    "Maringá",
    "Matinhos",
    "Medianeira",
    "Paranaguá",
    "Paranavaí",
    "Pato Branco",
    "Pinhais",
    "Piraquara",
    "Ponta Grossa",
    "Prudentópolis",
    "Rio Branco do Sul",
    "Rio Negro",
    "Rolândia",
    "Santo Antônio da Platina",
    "São José dos Pinhais",
    "São Mateus do Sul",
    "Sarandi",
    "Telêmaco Borba",
    "Toledo",
    "Umuarama",
    "União da Vitória",
    "Wenceslau Braz",
];

/// Whether `text` is the bare name of a known municipality, optionally
/// followed by the state abbreviation (`"Maringá - PR"`).
#[must_use]
pub fn is_known_municipality(text: &str) -> bool {
    let mut words = tokens(text);
    if words.last().is_some_and(|w| w == "pr") {
        words.pop();
    }
    if words.is_empty() {
        return false;
    }
    let candidate = words.join(" ");
    PARANA_MUNICIPALITIES
        .iter()
        .any(|name| tokens(name).join(" ") == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_accents_and_case() {
        assert!(is_known_municipality("Curitiba"));
        assert!(is_known_municipality("maringa"));
        assert!(is_known_municipality("SAO JOSE DOS PINHAIS"));
        assert!(is_known_municipality("  Foz do Iguaçu "));
    }

    #[test]
    fn accepts_trailing_state_abbreviation() {
        assert!(is_known_municipality("Londrina - PR"));
        assert!(is_known_municipality("Cascavel/PR"));
    }

    #[test]
    fn rejects_unknown_or_partial_names() {
        assert!(!is_known_municipality("xyz"));
        assert!(!is_known_municipality("Foz"));
        assert!(!is_known_municipality("PR"));
        assert!(!is_known_municipality(""));
    }
}
