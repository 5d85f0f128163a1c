use bkb_config::BkbConfig;

const SECTIONS: [(&str, &str); 4] = [
    ("LLM", "API_KEY"),
    ("SOURCE", "CSV_PATH"),
    ("OUTPUT", "DIR"),
    ("SITE", "BIND"),
];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &BkbConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &BkbConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();
    for (section, example) in SECTIONS {
        let single = format!("BKB_{section}_");
        let double = format!("BKB_{section}__");
        let mistyped = env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double));
        if !mistyped {
            continue;
        }

        let hint = format!("Use double underscores (example: {double}{example}).");
        if section == "LLM" && !config.llm.is_configured() {
            warnings.push(format!(
                "No API key configured while {single}* env vars exist. {hint}"
            ));
        } else {
            warnings.push(format!("{single}* env vars are ignored. {hint}"));
        }
    }

    warnings
}
