//! 课程-教师、教师-学科关联

use serde_json::{json, Value};

use super::{resource_path, HttpClient, RequestOptions};
use crate::common::AppResult;
use crate::model::{CursoProfessor, ProfessorDisciplina};

pub async fn list_course_professors(http: &HttpClient, curso_id: &str) -> AppResult<Vec<CursoProfessor>> {
    http.get(&resource_path(&["cursos", curso_id, "professores"])?, RequestOptions::new())
        .await
}

pub async fn link_professor_to_course(
    http: &HttpClient,
    curso_id: &str,
    professor_id: &str,
) -> AppResult<CursoProfessor> {
    let options = RequestOptions::new().json(&json!({ "professorId": professor_id }))?;
    http.post(&resource_path(&["cursos", curso_id, "professores"])?, options)
        .await
}

pub async fn unlink_professor_from_course(
    http: &HttpClient,
    curso_id: &str,
    professor_id: &str,
) -> AppResult<Value> {
    http.delete(
        &resource_path(&["cursos", curso_id, "professores", professor_id])?,
        RequestOptions::new(),
    )
    .await
}

pub async fn list_professor_disciplines(
    http: &HttpClient,
    professor_id: &str,
) -> AppResult<Vec<ProfessorDisciplina>> {
    http.get(
        &resource_path(&["professores", professor_id, "disciplinas"])?,
        RequestOptions::new(),
    )
    .await
}

pub async fn link_discipline_to_professor(
    http: &HttpClient,
    professor_id: &str,
    disciplina_id: &str,
) -> AppResult<ProfessorDisciplina> {
    let options = RequestOptions::new().json(&json!({ "disciplinaId": disciplina_id }))?;
    http.post(&resource_path(&["professores", professor_id, "disciplinas"])?, options)
        .await
}

pub async fn unlink_discipline_from_professor(
    http: &HttpClient,
    professor_id: &str,
    disciplina_id: &str,
) -> AppResult<Value> {
    http.delete(
        &resource_path(&["professores", professor_id, "disciplinas", disciplina_id])?,
        RequestOptions::new(),
    )
    .await
}
