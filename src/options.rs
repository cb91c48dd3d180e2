// Router Dashboard - Dashboard Options
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! User-configurable dashboard options and their schema.

use serde::Serialize;

use crate::models::CpuGraph;

/// Kind of input an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    MultiSelect,
}

/// One selectable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Description of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub choices: Vec<OptionChoice>,
    pub default: Vec<&'static str>,
}

/// All dashboard options keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsSchema {
    #[serde(rename = "cpuGraphs")]
    pub cpu_graphs: OptionSpec,
}

pub fn options_schema() -> OptionsSchema {
    OptionsSchema {
        cpu_graphs: OptionSpec {
            title: "CPU graphs",
            kind: OptionKind::MultiSelect,
            choices: CpuGraph::ALL
                .iter()
                .map(|g| OptionChoice {
                    value: g.key(),
                    label: g.label(),
                })
                .collect(),
            default: vec![CpuGraph::Total.key()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_graphs_schema() {
        let json = serde_json::to_value(options_schema()).unwrap();
        let cpu = &json["cpuGraphs"];
        assert_eq!(cpu["type"], "multi-select");
        assert_eq!(cpu["default"], serde_json::json!(["total"]));

        let values: Vec<&str> = cpu["choices"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["value"].as_str())
            .collect();
        assert_eq!(values, vec!["total", "intr", "user", "sys"]);
    }

    #[test]
    fn test_defaults_parse_back() {
        let schema = options_schema();
        let graphs: Vec<CpuGraph> = schema
            .cpu_graphs
            .default
            .iter()
            .filter_map(|k| CpuGraph::from_key(k))
            .collect();
        assert_eq!(graphs, vec![CpuGraph::Total]);
    }
}
