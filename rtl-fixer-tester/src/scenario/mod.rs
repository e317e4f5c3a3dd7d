use anyhow::Result;
use rtl_fixer_core::FixerConfig;

pub mod catalog;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub config: &'a FixerConfig,
    /// Upper bound on passes when waiting for the document to settle.
    pub max_passes: usize,
    pub verbose: bool,
}

pub type ScenarioCheck = fn(&ScenarioCtx<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct CatalogScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub check: ScenarioCheck,
}

impl CatalogScenario {
    /// # Errors
    ///
    /// Returns the first expectation the scenario found violated.
    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.check)(ctx)
    }
}

const CATALOG: &[CatalogScenario] = &[
    CatalogScenario {
        key: "scenario",
        name: "Paragraph Walkthrough",
        check: catalog::paragraph_walkthrough,
    },
    CatalogScenario {
        key: "idempotence",
        name: "Scan Idempotence",
        check: catalog::scan_idempotence,
    },
    CatalogScenario {
        key: "mode-cycle",
        name: "Mode Cycling",
        check: catalog::mode_cycle,
    },
    CatalogScenario {
        key: "detection",
        name: "Detection Precision",
        check: catalog::detection_precision,
    },
    CatalogScenario {
        key: "off-clears",
        name: "Off Clears State",
        check: catalog::off_clears_state,
    },
    CatalogScenario {
        key: "single-button",
        name: "Single Toggle Button",
        check: catalog::single_button,
    },
    CatalogScenario {
        key: "convergence",
        name: "Observer Convergence",
        check: catalog::observer_convergence,
    },
    CatalogScenario {
        key: "header-fix",
        name: "Header Adjustments",
        check: catalog::header_fix,
    },
    CatalogScenario {
        key: "missing-anchor",
        name: "Missing Toolbar Anchor",
        check: catalog::missing_anchor,
    },
];

pub fn get_scenario(name: &str) -> Option<CatalogScenario> {
    let wanted = name.to_lowercase();
    CATALOG
        .iter()
        .find(|scenario| scenario.key == wanted || scenario.name.to_lowercase() == wanted)
        .copied()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG
        .iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}

/// Replace `all` with every catalog key, keeping the other names in order.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = names.iter().filter(|s| *s != "all").cloned().collect();
    if names.iter().any(|s| s == "all") {
        for scenario in CATALOG {
            if !expanded.iter().any(|s| s == scenario.key) {
                expanded.push(scenario.key.to_string());
            }
        }
    }
    expanded
}
