// Static detection tables: tag patterns, language mapping, key files
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Technology tag -> patterns. Any single match is enough to add the tag.
const TECH_PATTERNS: &[(&str, &[&str])] = &[
    (
        "Python",
        &[
            r"requirements\.txt",
            r"setup\.py",
            r"pyproject\.toml",
            r"Pipfile",
            r"poetry\.lock",
            r"\.py$",
        ],
    ),
    (
        "JavaScript",
        &[
            r"package\.json",
            r"yarn\.lock",
            r"package-lock\.json",
            r"\.js$",
            r"\.jsx$",
            r"\.ts$",
            r"\.tsx$",
        ],
    ),
    ("TypeScript", &[r"tsconfig\.json", r"\.ts$", r"\.tsx$"]),
    ("Go", &[r"go\.mod", r"go\.sum", r"\.go$"]),
    ("Rust", &[r"Cargo\.toml", r"Cargo\.lock", r"\.rs$"]),
    (
        "Docker",
        &[r"Dockerfile", r"docker-compose\.yml", r"\.dockerignore"],
    ),
    (
        "Kubernetes",
        &[r".*\.yaml$", r".*\.yml$", r"k8s", r"kubernetes"],
    ),
    ("React", &[r"react", r"jsx", r"tsx"]),
    ("Node.js", &[r"package\.json", r"node_modules"]),
    ("FastAPI", &[r"fastapi", r"uvicorn"]),
    ("Flask", &[r"flask"]),
    ("Django", &[r"django"]),
    ("TensorFlow", &[r"tensorflow", r"tf\."]),
    ("PyTorch", &[r"torch", r"pytorch"]),
    ("Pandas", &[r"pandas", r"pd\."]),
    ("NumPy", &[r"numpy", r"np\."]),
    ("Scikit-learn", &[r"sklearn", r"scikit"]),
    ("PostgreSQL", &[r"postgresql", r"postgres"]),
    ("MongoDB", &[r"mongodb", r"mongo"]),
    ("Redis", &[r"redis"]),
    (
        "AWS",
        &[r"boto3", r"aws", r"s3", r"lambda", r"cloudformation"],
    ),
    ("Google Cloud", &[r"google-cloud", r"gcp", r"firebase"]),
    ("Azure", &[r"azure", r"azurerm"]),
];

/// GitHub language name -> tag.
const LANGUAGE_TAGS: &[(&str, &str)] = &[
    ("Python", "Python"),
    ("JavaScript", "JavaScript"),
    ("TypeScript", "TypeScript"),
    ("Go", "Go"),
    ("Rust", "Rust"),
    ("HTML", "HTML"),
    ("CSS", "CSS"),
    ("Shell", "Shell"),
    ("Dockerfile", "Docker"),
    ("Makefile", "Make"),
];

/// Root-level manifests whose content is scanned.
pub const KEY_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Dockerfile",
    "docker-compose.yml",
    "Pipfile",
    "poetry.lock",
    "yarn.lock",
    "package-lock.json",
    "tsconfig.json",
    "go.sum",
    "Cargo.lock",
];

/// Tried in order; first one that fetches wins.
pub const README_CANDIDATES: &[&str] = &["README.md", "readme.md", "README.txt", "readme.txt"];

pub struct TechPattern {
    pub tag: &'static str,
    pub patterns: Vec<Regex>,
}

pub static TECH_TABLE: LazyLock<Vec<TechPattern>> = LazyLock::new(|| {
    TECH_PATTERNS
        .iter()
        .map(|&(tag, sources)| TechPattern {
            tag,
            patterns: sources
                .iter()
                .map(|src| {
                    RegexBuilder::new(&end_anchor(src))
                        .case_insensitive(true)
                        .build()
                        .expect("built-in tech pattern must compile")
                })
                .collect(),
        })
        .collect()
});

/// `$` also accepts one trailing newline, so `\.py$` still fires on file
/// contents that end with a line break.
fn end_anchor(pattern: &str) -> String {
    match pattern.strip_suffix('$') {
        Some(body) => format!(r"{body}\n?\z"),
        None => pattern.to_string(),
    }
}

pub fn is_key_file(name: &str) -> bool {
    KEY_FILES.contains(&name)
}

/// Maps a GitHub language name onto a tag, if it is one we track.
pub fn language_tag(language: &str) -> Option<&'static str> {
    LANGUAGE_TAGS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, tag)| *tag)
}
