//! Registry of known input document types.
//!
//! Each input type rig understands is described once here: which file names
//! select it, which schema validates it, and which template variants can
//! render it. Paths are relative to the templates root handed to
//! [`TemplateTypeResolver`](crate::resolver::TemplateTypeResolver).

/// A named template set for one input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateVariant {
    /// Key used to select the variant on the command line (e.g. "kustomize")
    pub name: &'static str,
    /// Template directory, relative to the templates root
    pub dir: &'static str,
}

/// Static description of an input document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateTypeConfig {
    /// Short type code (e.g. "k8s")
    pub code: &'static str,
    /// Input file names that select this type
    pub file_names: &'static [&'static str],
    /// JSON-Schema document, relative to the templates root
    pub schema_path: &'static str,
    /// Available template variants
    pub variants: &'static [TemplateVariant],
    /// Variant used when none is requested
    pub default_variant: &'static str,
    /// Message printed after a successful breakout
    pub completion_message: &'static str,
    /// Single-file template rendered to stdout by `build`, if the type supports it
    pub stdout_template: Option<&'static str>,
}

/// All registered input types.
pub static TEMPLATE_TYPES: &[TemplateTypeConfig] = &[
    TemplateTypeConfig {
        code: "build",
        file_names: &["build.yaml", "build.yml", "build.json"],
        schema_path: "build/schema.json",
        variants: &[TemplateVariant {
            name: "jenkins",
            dir: "build/Jenkins",
        }],
        default_variant: "jenkins",
        completion_message: "Done. Commit the generated Jenkinsfile to enable the pipeline.",
        stdout_template: None,
    },
    TemplateTypeConfig {
        code: "k8s",
        file_names: &["k8s.yaml", "k8s.yml", "k8s.json"],
        schema_path: "k8s/schema.json",
        variants: &[
            TemplateVariant {
                name: "kustomize",
                dir: "k8s/Kustomize",
            },
            TemplateVariant {
                name: "gotemplates",
                dir: "k8s/GoTemplates",
            },
        ],
        default_variant: "kustomize",
        completion_message: "Done. Kubernetes manifests are ready to apply.",
        stdout_template: Some("k8s/manifests.yaml"),
    },
];

impl TemplateTypeConfig {
    /// Find the type registered for an input file name (not a path).
    pub fn for_file_name(file_name: &str) -> Option<&'static TemplateTypeConfig> {
        TEMPLATE_TYPES
            .iter()
            .find(|config| config.file_names.contains(&file_name))
    }

    /// Look up a variant by key, ignoring case.
    pub fn variant(&self, name: &str) -> Option<&'static TemplateVariant> {
        self.variants
            .iter()
            .find(|variant| variant.name.eq_ignore_ascii_case(name))
    }

    /// The variant used when none is requested.
    pub fn default_template(&self) -> Option<&'static TemplateVariant> {
        self.variant(self.default_variant)
    }

    pub fn variant_names(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.name).collect()
    }
}
