//! ISO 639 registry: single source of truth for recognised languages.
//!
//! Every ISO 639-1 language is listed together with its ISO 639-2/T code and
//! English name. The registry is built once on first access (`OnceLock`) and is
//! immutable afterwards, so concurrent requests can share it freely.

use std::sync::OnceLock;

/// A recognised ISO 639 language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoLanguage {
    /// ISO 639-1 two-letter code (e.g., "en", "fr")
    pub alpha2: &'static str,

    /// ISO 639-2/T three-letter code (e.g., "eng", "fra")
    pub alpha3: &'static str,

    /// English name of the language
    pub name: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<IsoLanguage>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: iso_languages(),
        })
    }

    /// Look up a language by its two-letter ISO 639-1 code.
    ///
    /// The code must already be lowercase. Withdrawn codes (`iw`, `in`, `ji`)
    /// resolve to their current replacements.
    pub fn by_alpha2(&self, code: &str) -> Option<&IsoLanguage> {
        let code = current_alpha2(code);
        self.languages.iter().find(|lang| lang.alpha2 == code)
    }

    /// Look up a language by its three-letter ISO 639-2/T code.
    ///
    /// The code must already be lowercase.
    pub fn by_alpha3(&self, code: &str) -> Option<&IsoLanguage> {
        self.languages.iter().find(|lang| lang.alpha3 == code)
    }

    /// Look up a language by either a two- or three-letter code.
    pub fn lookup(&self, code: &str) -> Option<&IsoLanguage> {
        match code.len() {
            2 => self.by_alpha2(code),
            3 => self.by_alpha3(code),
            _ => None,
        }
    }

    /// Number of languages in the registry.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether the registry is empty (never true for the built-in table).
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Map a withdrawn ISO 639-1 code to the code that replaced it.
fn current_alpha2(code: &str) -> &str {
    match code {
        "iw" => "he",
        "in" => "id",
        "ji" => "yi",
        other => other,
    }
}

macro_rules! iso {
    ($alpha2:literal, $alpha3:literal, $name:literal) => {
        IsoLanguage {
            alpha2: $alpha2,
            alpha3: $alpha3,
            name: $name,
        }
    };
}

/// The ISO 639-1 table with ISO 639-2/T equivalents.
fn iso_languages() -> Vec<IsoLanguage> {
    vec![
        iso!("aa", "aar", "Afar"),
        iso!("ab", "abk", "Abkhazian"),
        iso!("ae", "ave", "Avestan"),
        iso!("af", "afr", "Afrikaans"),
        iso!("ak", "aka", "Akan"),
        iso!("am", "amh", "Amharic"),
        iso!("an", "arg", "Aragonese"),
        iso!("ar", "ara", "Arabic"),
        iso!("as", "asm", "Assamese"),
        iso!("av", "ava", "Avaric"),
        iso!("ay", "aym", "Aymara"),
        iso!("az", "aze", "Azerbaijani"),
        iso!("ba", "bak", "Bashkir"),
        iso!("be", "bel", "Belarusian"),
        iso!("bg", "bul", "Bulgarian"),
        iso!("bi", "bis", "Bislama"),
        iso!("bm", "bam", "Bambara"),
        iso!("bn", "ben", "Bengali"),
        iso!("bo", "bod", "Tibetan"),
        iso!("br", "bre", "Breton"),
        iso!("bs", "bos", "Bosnian"),
        iso!("ca", "cat", "Catalan"),
        iso!("ce", "che", "Chechen"),
        iso!("ch", "cha", "Chamorro"),
        iso!("co", "cos", "Corsican"),
        iso!("cr", "cre", "Cree"),
        iso!("cs", "ces", "Czech"),
        iso!("cu", "chu", "Church Slavic"),
        iso!("cv", "chv", "Chuvash"),
        iso!("cy", "cym", "Welsh"),
        iso!("da", "dan", "Danish"),
        iso!("de", "deu", "German"),
        iso!("dv", "div", "Divehi"),
        iso!("dz", "dzo", "Dzongkha"),
        iso!("ee", "ewe", "Ewe"),
        iso!("el", "ell", "Greek"),
        iso!("en", "eng", "English"),
        iso!("eo", "epo", "Esperanto"),
        iso!("es", "spa", "Spanish"),
        iso!("et", "est", "Estonian"),
        iso!("eu", "eus", "Basque"),
        iso!("fa", "fas", "Persian"),
        iso!("ff", "ful", "Fulah"),
        iso!("fi", "fin", "Finnish"),
        iso!("fj", "fij", "Fijian"),
        iso!("fo", "fao", "Faroese"),
        iso!("fr", "fra", "French"),
        iso!("fy", "fry", "Western Frisian"),
        iso!("ga", "gle", "Irish"),
        iso!("gd", "gla", "Scottish Gaelic"),
        iso!("gl", "glg", "Galician"),
        iso!("gn", "grn", "Guarani"),
        iso!("gu", "guj", "Gujarati"),
        iso!("gv", "glv", "Manx"),
        iso!("ha", "hau", "Hausa"),
        iso!("he", "heb", "Hebrew"),
        iso!("hi", "hin", "Hindi"),
        iso!("ho", "hmo", "Hiri Motu"),
        iso!("hr", "hrv", "Croatian"),
        iso!("ht", "hat", "Haitian"),
        iso!("hu", "hun", "Hungarian"),
        iso!("hy", "hye", "Armenian"),
        iso!("hz", "her", "Herero"),
        iso!("ia", "ina", "Interlingua"),
        iso!("id", "ind", "Indonesian"),
        iso!("ie", "ile", "Interlingue"),
        iso!("ig", "ibo", "Igbo"),
        iso!("ii", "iii", "Sichuan Yi"),
        iso!("ik", "ipk", "Inupiaq"),
        iso!("io", "ido", "Ido"),
        iso!("is", "isl", "Icelandic"),
        iso!("it", "ita", "Italian"),
        iso!("iu", "iku", "Inuktitut"),
        iso!("ja", "jpn", "Japanese"),
        iso!("jv", "jav", "Javanese"),
        iso!("ka", "kat", "Georgian"),
        iso!("kg", "kon", "Kongo"),
        iso!("ki", "kik", "Kikuyu"),
        iso!("kj", "kua", "Kuanyama"),
        iso!("kk", "kaz", "Kazakh"),
        iso!("kl", "kal", "Kalaallisut"),
        iso!("km", "khm", "Khmer"),
        iso!("kn", "kan", "Kannada"),
        iso!("ko", "kor", "Korean"),
        iso!("kr", "kau", "Kanuri"),
        iso!("ks", "kas", "Kashmiri"),
        iso!("ku", "kur", "Kurdish"),
        iso!("kv", "kom", "Komi"),
        iso!("kw", "cor", "Cornish"),
        iso!("ky", "kir", "Kirghiz"),
        iso!("la", "lat", "Latin"),
        iso!("lb", "ltz", "Luxembourgish"),
        iso!("lg", "lug", "Ganda"),
        iso!("li", "lim", "Limburgan"),
        iso!("ln", "lin", "Lingala"),
        iso!("lo", "lao", "Lao"),
        iso!("lt", "lit", "Lithuanian"),
        iso!("lu", "lub", "Luba-Katanga"),
        iso!("lv", "lav", "Latvian"),
        iso!("mg", "mlg", "Malagasy"),
        iso!("mh", "mah", "Marshallese"),
        iso!("mi", "mri", "Maori"),
        iso!("mk", "mkd", "Macedonian"),
        iso!("ml", "mal", "Malayalam"),
        iso!("mn", "mon", "Mongolian"),
        iso!("mr", "mar", "Marathi"),
        iso!("ms", "msa", "Malay"),
        iso!("mt", "mlt", "Maltese"),
        iso!("my", "mya", "Burmese"),
        iso!("na", "nau", "Nauru"),
        iso!("nb", "nob", "Norwegian Bokmål"),
        iso!("nd", "nde", "North Ndebele"),
        iso!("ne", "nep", "Nepali"),
        iso!("ng", "ndo", "Ndonga"),
        iso!("nl", "nld", "Dutch"),
        iso!("nn", "nno", "Norwegian Nynorsk"),
        iso!("no", "nor", "Norwegian"),
        iso!("nr", "nbl", "South Ndebele"),
        iso!("nv", "nav", "Navajo"),
        iso!("ny", "nya", "Chichewa"),
        iso!("oc", "oci", "Occitan"),
        iso!("oj", "oji", "Ojibwa"),
        iso!("om", "orm", "Oromo"),
        iso!("or", "ori", "Oriya"),
        iso!("os", "oss", "Ossetian"),
        iso!("pa", "pan", "Punjabi"),
        iso!("pi", "pli", "Pali"),
        iso!("pl", "pol", "Polish"),
        iso!("ps", "pus", "Pashto"),
        iso!("pt", "por", "Portuguese"),
        iso!("qu", "que", "Quechua"),
        iso!("rm", "roh", "Romansh"),
        iso!("rn", "run", "Rundi"),
        iso!("ro", "ron", "Romanian"),
        iso!("ru", "rus", "Russian"),
        iso!("rw", "kin", "Kinyarwanda"),
        iso!("sa", "san", "Sanskrit"),
        iso!("sc", "srd", "Sardinian"),
        iso!("sd", "snd", "Sindhi"),
        iso!("se", "sme", "Northern Sami"),
        iso!("sg", "sag", "Sango"),
        iso!("si", "sin", "Sinhala"),
        iso!("sk", "slk", "Slovak"),
        iso!("sl", "slv", "Slovenian"),
        iso!("sm", "smo", "Samoan"),
        iso!("sn", "sna", "Shona"),
        iso!("so", "som", "Somali"),
        iso!("sq", "sqi", "Albanian"),
        iso!("sr", "srp", "Serbian"),
        iso!("ss", "ssw", "Swati"),
        iso!("st", "sot", "Southern Sotho"),
        iso!("su", "sun", "Sundanese"),
        iso!("sv", "swe", "Swedish"),
        iso!("sw", "swa", "Swahili"),
        iso!("ta", "tam", "Tamil"),
        iso!("te", "tel", "Telugu"),
        iso!("tg", "tgk", "Tajik"),
        iso!("th", "tha", "Thai"),
        iso!("ti", "tir", "Tigrinya"),
        iso!("tk", "tuk", "Turkmen"),
        iso!("tl", "tgl", "Tagalog"),
        iso!("tn", "tsn", "Tswana"),
        iso!("to", "ton", "Tonga"),
        iso!("tr", "tur", "Turkish"),
        iso!("ts", "tso", "Tsonga"),
        iso!("tt", "tat", "Tatar"),
        iso!("tw", "twi", "Twi"),
        iso!("ty", "tah", "Tahitian"),
        iso!("ug", "uig", "Uighur"),
        iso!("uk", "ukr", "Ukrainian"),
        iso!("ur", "urd", "Urdu"),
        iso!("uz", "uzb", "Uzbek"),
        iso!("ve", "ven", "Venda"),
        iso!("vi", "vie", "Vietnamese"),
        iso!("vo", "vol", "Volapük"),
        iso!("wa", "wln", "Walloon"),
        iso!("wo", "wol", "Wolof"),
        iso!("xh", "xho", "Xhosa"),
        iso!("yi", "yid", "Yiddish"),
        iso!("yo", "yor", "Yoruba"),
        iso!("za", "zha", "Zhuang"),
        iso!("zh", "zho", "Chinese"),
        iso!("zu", "zul", "Zulu"),
    ]
}
