use crowbook_text_processing::escape;
use serde::Serialize;

use super::Grammar;
use crate::error::error_json;
use crate::symbol::EPSILON;

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        if self.rights.is_empty() {
            return format!("{:>width$} ->", self.left, width = left_width);
        }
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Debug, Serialize)]
pub struct ProductionOutputVec<'a> {
    start: &'a str,
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(error_json)
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .rules
            .iter()
            .map(|(left, productions)| ProductionOutput {
                left: left.as_str(),
                rights: productions
                    .iter()
                    .map(|p| p.iter().map(|s| s.name()).collect())
                    .collect(),
            })
            .collect();
        ProductionOutputVec {
            start: self.start_symbol.as_str(),
            productions,
        }
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_production_output_vec().to_plaintext())
    }
}
