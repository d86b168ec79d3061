use serde::{Deserialize, Serialize};

/// 管理面板的汇总统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_usuarios: u64,
    pub total_professores: u64,
    pub total_cursos: u64,
    pub total_disciplinas: u64,
    pub total_turmas: u64,
    pub total_salas: u64,
}
