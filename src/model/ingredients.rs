use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Units and container words stripped from the start of an ingredient.
const UNITS: &[&str] = &[
    "kg", "kgs", "g", "gr", "grs", "gramo", "gramos", "ml", "cc", "l", "litro", "litros",
    "taza", "tazas", "tacita", "tacitas", "cucharada", "cucharadas", "cucharadita",
    "cucharaditas", "cda", "cdas", "cdta", "cdtas", "cdita", "cditas", "diente", "dientes",
    "lata", "latas", "copa", "copas", "pizca", "pizcas", "puñado", "puñados", "hoja", "hojas",
    "rama", "ramas", "ramita", "ramitas", "jugo", "ralladura", "chorrito", "chorro", "tapita",
    "paquete", "paquetes", "sobre", "sobres", "unidad", "unidades", "feta", "fetas", "rodaja",
    "rodajas", "frasco", "frascos",
];

/// Articles and prepositions left dangling once the quantity is gone.
const ARTICLES: &[&str] = &[
    "de", "del", "la", "el", "los", "las", "un", "una", "unos", "unas", "al",
];

/// Size and state qualifiers that do not identify the ingredient.
const QUALIFIERS: &[&str] = &[
    "grande", "grandes", "mediano", "mediana", "medianos", "medianas", "chico", "chica",
    "chicos", "chicas", "pequeño", "pequeña", "pequeños", "pequeñas", "fresco", "fresca",
    "frescos", "frescas", "cocido", "cocida", "cocidos", "cocidas", "picado", "picada",
    "picados", "picadas",
];

/// Spelled-out fractions at the start of an ingredient.
const TEXT_FRACTIONS: &[&str] = &["un cuarto", "medio", "media", "cuarto"];

/// Serving notes stripped from the end of an ingredient, applied in order.
const TRAILING_NOTES: &[&str] = &[
    r"\s*\([^()]*\)\s*$",
    r"(?i)\s*,?\s*cantidad necesaria\s*$",
    r"(?i)\s*,?\s*a gusto\s*$",
];

const MAX_ARTICLE_PASSES: usize = 4;

struct Patterns {
    trailing_notes: Vec<Regex>,
    trailing_qualifier: Regex,
    leading_qualifier: Regex,
    unicode_fraction: Regex,
    text_fraction: Regex,
    quantity: Regex,
    unit: Regex,
    leading_note: Regex,
    article: Regex,
}

fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid ingredient pattern")
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let qualifiers = alternation(QUALIFIERS);
        Patterns {
            trailing_notes: TRAILING_NOTES.iter().map(|p| compile(p)).collect(),
            trailing_qualifier: compile(&format!(r"(?i)\s+({qualifiers})$")),
            leading_qualifier: compile(&format!(r"(?i)^({qualifiers})\s+")),
            unicode_fraction: compile("[½¼¾⅓⅔⅛]"),
            text_fraction: compile(&format!(r"(?i)^({})\s+", alternation(TEXT_FRACTIONS))),
            quantity: compile(r"^\d+[./,]?\d*\s*"),
            unit: compile(&format!(r"(?i)^({})\b\s*", alternation(UNITS))),
            leading_note: compile(r"^\([^()]*\)\s*"),
            article: compile(&format!(r"(?i)^({})\b\s+", alternation(ARTICLES))),
        }
    })
}

/// Normalizes a list of raw ingredient lines.
///
/// Returns the unique normalized names in sorted order. Lines that reduce to
/// nothing (for example a bare quantity) are dropped.
///
/// # Examples
///
/// ```
/// use recipe_catalog::normalize_ingredients;
///
/// let raw = vec![
///     "1 peceto (aprox. 1,5 kg)".to_string(),
///     "Sal y pimienta a gusto".to_string(),
///     "2 cucharadas de mostaza".to_string(),
/// ];
/// assert_eq!(
///     normalize_ingredients(&raw),
///     vec!["mostaza", "peceto", "pimienta", "sal"]
/// );
/// ```
pub fn normalize_ingredients(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| normalize_ingredient(line))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Normalizes one raw ingredient line.
///
/// Lines listing alternatives or pairs ("sal y pimienta", "tapita o
/// cucharadita") produce one name per part.
pub fn normalize_ingredient(line: &str) -> Vec<String> {
    line.split(" o ")
        .flat_map(|part| part.split(" y "))
        .filter_map(clean_part)
        .collect()
}

fn clean_part(part: &str) -> Option<String> {
    let p = patterns();
    let mut text = part.trim().to_string();

    for note in &p.trailing_notes {
        text = note.replace(&text, "").into_owned();
    }
    text = p.trailing_qualifier.replace(&text, "").into_owned();
    text = p.unicode_fraction.replace_all(&text, "").into_owned();
    text = p.text_fraction.replace(&text, "").into_owned();
    text = p.quantity.replace(&text, "").into_owned();
    text = p.unit.replace(&text, "").into_owned();
    text = p.leading_note.replace(&text, "").into_owned();

    for _ in 0..MAX_ARTICLE_PASSES {
        let stripped = p.article.replace(&text, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }
    text = p.leading_qualifier.replace(&text, "").into_owned();

    let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.matches('(').count() != text.matches(')').count() {
        text = text.replace(['(', ')'], "");
    }
    let text = text
        .trim()
        .trim_end_matches([',', ';', ':', '.'])
        .trim()
        .to_lowercase();

    if text.is_empty() {
        None
    } else {
        Some(singularize(&text))
    }
}

/// Singularizes the last word of a phrase with basic Spanish plural rules.
fn singularize(phrase: &str) -> String {
    match phrase.rsplit_once(' ') {
        Some((head, last)) => format!("{head} {}", singularize_word(last)),
        None => singularize_word(phrase),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú')
}

fn singularize_word(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n < 3 {
        return word.to_string();
    }

    // nueces -> nuez
    if let Some(stem) = word.strip_suffix("ces") {
        return format!("{stem}z");
    }

    // limones -> limon, panes -> pan
    if n > 3
        && word.ends_with("es")
        && matches!(chars[n - 3], 'l' | 'n' | 'r' | 'd' | 'j' | 's' | 'x' | 'y')
    {
        return chars[..n - 2].iter().collect();
    }

    // huevos -> huevo, tomates -> tomate
    if chars[n - 1] == 's' && is_vowel(chars[n - 2]) {
        return chars[..n - 1].iter().collect();
    }

    word.to_string()
}
