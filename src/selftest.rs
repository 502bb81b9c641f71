//! Built-in smoke scenarios behind `conflang --test`.

use crate::compiler;
use crate::config::TranslatorConfig;

pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
    pub expected: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "single number",
        source: "port = 0x1A",
        expected: "{\n  \"port\": 26\n}",
    },
    Scenario {
        name: "array",
        source: "ports = #( 0x01 0x02 0x03 )",
        expected: "{\n  \"ports\": [1, 2, 3]\n}",
    },
    Scenario {
        name: "constant",
        source: "global MAX_SIZE = 0x100\nsize = ?[MAX_SIZE]",
        expected: "{\n  \"size\": 256\n}",
    },
    Scenario {
        name: "object",
        source: "config = { timeout = 0x1E enabled = true }",
        expected: "{\n  \"config\": {\n    \"enabled\": true,\n    \"timeout\": 30\n  }\n}",
    },
    Scenario {
        name: "combined",
        source: "global PORT = 0x50\nserver = { port = ?[PORT] hosts = #( \"host1\" \"host2\" ) }",
        expected: "{\n  \"server\": {\n    \"hosts\": [\"host1\", \"host2\"],\n    \"port\": 80\n  }\n}",
    },
    Scenario {
        name: "nested objects",
        source: "app = { database = { host = \"localhost\" port = 0x2276 } }",
        expected: "{\n  \"app\": {\n    \"database\": {\n      \"host\": \"localhost\",\n      \"port\": 8822\n    }\n  }\n}",
    },
    Scenario {
        name: "mixed types",
        source: "settings = { numbers = #( 0x01 0x02 ) strings = #( \"a\" \"b\" ) flag = true }",
        expected: "{\n  \"settings\": {\n    \"flag\": true,\n    \"numbers\": [1, 2],\n    \"strings\": [\"a\", \"b\"]\n  }\n}",
    },
    Scenario {
        name: "multiple constants",
        source: "global WIDTH = 0x500\nglobal HEIGHT = 0x300\ndimensions = { width = ?[WIDTH] height = ?[HEIGHT] }",
        expected: "{\n  \"dimensions\": {\n    \"height\": 768,\n    \"width\": 1280\n  }\n}",
    },
];

#[derive(Debug)]
pub struct Outcome {
    pub number: usize,
    pub name: &'static str,
    /// Translated text, or the error message.
    pub output: Result<String, String>,
    pub passed: bool,
}

pub fn run(config: &TranslatorConfig) -> Vec<Outcome> {
    SCENARIOS
        .iter()
        .enumerate()
        .map(|(i, scenario)| {
            let output = compiler::translate_with(scenario.source, config).map_err(|e| e.to_string());
            let passed = matches!(&output, Ok(json) if json == scenario.expected);
            Outcome { number: i + 1, name: scenario.name, output, passed }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scenarios_pass_with_defaults() {
        let outcomes = run(&TranslatorConfig::default());
        assert_eq!(outcomes.len(), 8);
        for outcome in outcomes {
            assert!(outcome.passed, "scenario {} ({}) failed: {:?}", outcome.number, outcome.name, outcome.output);
        }
    }

    #[test]
    fn too_tight_depth_limit_fails_nested_scenario() {
        let config = TranslatorConfig { max_depth: 1, ..TranslatorConfig::default() };
        let outcomes = run(&config);
        let nested = &outcomes[5];
        assert!(!nested.passed);
        assert!(nested.output.as_ref().unwrap_err().contains("nesting deeper than 1"));
        assert!(outcomes[0].passed);
    }
}
