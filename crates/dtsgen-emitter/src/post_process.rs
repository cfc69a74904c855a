//! Textual post-processing of rendered declaration files.
//!
//! Rules are keyed by output target: the file path relative to the output
//! root, without the `.d.ts` extension (`classes/sap/m/Button`). Keys may be
//! glob patterns; `*` stops at `/`, `**` crosses directories. Every matching
//! rule set is applied in configuration order.

use dtsgen_common::PostProcessRule;
use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum PostProcessError {
    #[error("invalid post-processing target pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("invalid regex '{search}' for '{pattern}': {source}")]
    Regex {
        pattern: String,
        search: String,
        #[source]
        source: regex::Error,
    },
    #[error("unsupported regex flag '{flag}' for '{pattern}'")]
    Flag { pattern: String, flag: char },
}

/// One compiled rule. Literal rules match their search text verbatim and
/// always replace every occurrence.
#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    /// Replacement in `regex` expansion syntax.
    replacement: String,
    /// `g` flag: replace every match, else only the first.
    global: bool,
}

impl CompiledRule {
    fn compile(pattern: &str, rule: &PostProcessRule) -> Result<Self, PostProcessError> {
        let replacement = expand_js_replacement(&rule.replacement);
        if !rule.is_regex {
            let regex = Regex::new(&regex::escape(&rule.search_string)).map_err(|source| {
                PostProcessError::Regex {
                    pattern: pattern.to_string(),
                    search: rule.search_string.clone(),
                    source,
                }
            })?;
            return Ok(CompiledRule {
                regex,
                replacement,
                global: true,
            });
        }

        let mut builder = RegexBuilder::new(&rule.search_string);
        let mut global = false;
        for flag in rule.regex_flags.as_deref().unwrap_or("").chars() {
            match flag {
                'g' => global = true,
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'u' => {}
                other => {
                    return Err(PostProcessError::Flag {
                        pattern: pattern.to_string(),
                        flag: other,
                    });
                }
            }
        }
        let regex = builder.build().map_err(|source| PostProcessError::Regex {
            pattern: pattern.to_string(),
            search: rule.search_string.clone(),
            source,
        })?;
        Ok(CompiledRule {
            regex,
            replacement,
            global,
        })
    }

    fn apply(&self, text: String) -> String {
        if self.regex.as_str().is_empty() {
            return text;
        }
        let replaced = if self.global {
            self.regex.replace_all(&text, self.replacement.as_str())
        } else {
            self.regex.replace(&text, self.replacement.as_str())
        };
        replaced.into_owned()
    }
}

/// Translate a JavaScript `String.prototype.replace` template into `regex`
/// expansion syntax.
///
/// `$&` is the whole match, `$1`..`$99` numbered groups, `$<name>` named
/// groups and `$$` a literal `$`. `` $` `` and `$'` have no equivalent and,
/// like any other `$` not starting one of these forms, stay literal.
pub fn expand_js_replacement(template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '$' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('$') => {
                out.push_str("$$");
                i += 2;
            }
            Some('&') => {
                out.push_str("${0}");
                i += 2;
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = d.to_string();
                if let Some(next) = chars.get(i + 2).filter(|c| c.is_ascii_digit()) {
                    digits.push(*next);
                }
                out.push_str(&format!("${{{digits}}}"));
                i += 1 + digits.len();
            }
            Some('<') => match chars[i + 2..].iter().position(|&c| c == '>') {
                Some(len) => {
                    let name: String = chars[i + 2..i + 2 + len].iter().collect();
                    out.push_str(&format!("${{{name}}}"));
                    i += len + 3;
                }
                None => {
                    out.push_str("$$");
                    i += 1;
                }
            },
            _ => {
                out.push_str("$$");
                i += 1;
            }
        }
    }
    out
}

#[derive(Debug)]
struct RuleSet {
    pattern: String,
    matcher: GlobMatcher,
    rules: Vec<CompiledRule>,
}

#[derive(Debug, Default)]
pub struct PostProcessor {
    sets: Vec<RuleSet>,
}

impl PostProcessor {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile every rule up front so a bad pattern fails before rendering.
    pub fn from_config(
        config: &IndexMap<String, Vec<PostProcessRule>>,
    ) -> Result<Self, PostProcessError> {
        let mut sets = Vec::with_capacity(config.len());
        for (pattern, rules) in config {
            let matcher = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| PostProcessError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?
                .compile_matcher();
            let rules = rules
                .iter()
                .map(|rule| CompiledRule::compile(pattern, rule))
                .collect::<Result<Vec<_>, _>>()?;
            sets.push(RuleSet {
                pattern: pattern.clone(),
                matcher,
                rules,
            });
        }
        Ok(PostProcessor { sets })
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn applies_to(&self, target: &str) -> bool {
        self.sets.iter().any(|set| set.matcher.is_match(target))
    }

    pub fn apply(&self, target: &str, text: String) -> String {
        let mut text = text;
        for set in self.sets.iter().filter(|set| set.matcher.is_match(target)) {
            trace!(
                output = target,
                pattern = %set.pattern,
                rules = set.rules.len(),
                "post-processing"
            );
            for rule in &set.rules {
                text = rule.apply(text);
            }
        }
        text
    }
}
