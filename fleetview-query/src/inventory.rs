// Copyright 2025 AgentReplay (https://github.com/agentreplay)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Inventory filter over the agent catalog.

use fleetview_core::{AgentRow, AgentStatus, Environment, ModelName, Runtime, Selection, StatusThresholds};
use serde::{Deserialize, Serialize};

/// Whether one agent passes the current filters
pub fn matches(
    agent: &AgentRow,
    environment: Environment,
    models: &Selection<ModelName>,
    platforms: &Selection<Runtime>,
) -> bool {
    agent.environment == environment
        && models.contains(&agent.model_name)
        && platforms.contains(&agent.runtime)
}

/// Stable filter: catalog order is preserved and the catalog is untouched
pub fn filter_agents(
    catalog: &[AgentRow],
    environment: Environment,
    models: &Selection<ModelName>,
    platforms: &Selection<Runtime>,
) -> Vec<AgentRow> {
    catalog
        .iter()
        .filter(|agent| matches(agent, environment, models, platforms))
        .cloned()
        .collect()
}

/// An agent whose authored status differs from its error-rate band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMismatch {
    pub id: String,
    pub agent_name: String,
    pub authored: AgentStatus,
    pub banded: AgentStatus,
}

/// Flag rows whose authored status disagrees with the banding. Rows are
/// reported, never rewritten.
pub fn status_mismatches(agents: &[AgentRow], thresholds: &StatusThresholds) -> Vec<StatusMismatch> {
    agents
        .iter()
        .filter_map(|agent| {
            let banded = agent.banded_status(thresholds);
            (banded != agent.status).then(|| StatusMismatch {
                id: agent.id.clone(),
                agent_name: agent.agent_name.clone(),
                authored: agent.status,
                banded,
            })
        })
        .collect()
}
