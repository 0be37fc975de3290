/// Maximum length for name-like fields, to keep text formatting simple
pub const NAME_MAX_LEN: usize = 80;

/// Litter siblings' birthdays may differ by at most this many days
pub const LITTER_TOLERANCE_DAYS: i64 = 2;

/// Starting year for the most-recent-birth/death summary counters
pub const SUMMARY_EPOCH_YEAR: i32 = 1970;

/// Date fields must parse in this form (or be the literal "unknown")
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Prefix marking a site reference as a wild range rather than a zoo
pub const WILD_REF_PREFIX: &str = "wild.";

/// Category subdirectories under the input root, in import order
pub const ZOO_DIR: &str = "zoos";
pub const WILD_DIR: &str = "wild";
pub const PANDA_DIR: &str = "pandas";
pub const MEDIA_DIR: &str = "media";

/// Default location of the exported interchange document
pub const DEFAULT_OUTPUT: &str = "export/redpanda.json";

/// Progress spinner tick interval (every N record files)
pub const PROGRESS_INTERVAL: u64 = 100;

/// Placeholder in index.html replaced by the character inventory
pub const VITAMIN_PLACEHOLDER: &str = "${vitamins}";

/// HTML entities the character inventory always starts with
pub const VITAMIN_SEED: &str = "&amp;&copy;&lsquo;&rsquo;&ldquo;&rdquo;&nacute;";

/// Presentation assets scanned for the character inventory
pub const VITAMIN_MANIFEST: &[&str] = &[
    "export/redpanda.json",
    "index.html",
    "js/pandas.js",
    "js/show.js",
    "fragments/en/about.html",
    "fragments/jp/about.html",
    "fragments/en/links.html",
    "fragments/jp/links.html",
];
