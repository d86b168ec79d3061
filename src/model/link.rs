use serde::{Deserialize, Serialize};

/// 课程与教师的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursoProfessor {
    pub curso_id: String,
    pub professor_id: String,
}

/// 教师与学科的关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorDisciplina {
    pub professor_id: String,
    pub disciplina_id: String,
}
