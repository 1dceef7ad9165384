use thiserror::Error;

/// Vertex and fragment shader texts split out of a combined source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderParseError {
    #[error("missing `#shader vertex` section")]
    MissingVertex,
    #[error("missing `#shader fragment` section")]
    MissingFragment,
    #[error("line {line}: unknown shader stage `{stage}`")]
    UnknownStage { line: usize, stage: String },
}

/// Splits a combined shader file into its per-stage sources.
///
/// The file convention is a line starting with `#shader vertex` or
/// `#shader fragment` opening each section; everything until the next tag
/// belongs to that section. Text before the first tag is ignored. Each tag
/// must appear at least once; a tag naming any other stage is an error.
pub fn parse_shader_source(text: &str) -> Result<ShaderSource, ShaderParseError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Stage {
        None,
        Vertex,
        Fragment,
    }

    let mut stage = Stage::None;
    let mut vertex: Option<String> = None;
    let mut fragment: Option<String> = None;

    for (index, line) in text.lines().enumerate() {
        if let Some(rest) = line.trim_start().strip_prefix("#shader") {
            let name = rest.trim();
            stage = match name {
                "vertex" => {
                    vertex.get_or_insert_with(String::new);
                    Stage::Vertex
                }
                "fragment" => {
                    fragment.get_or_insert_with(String::new);
                    Stage::Fragment
                }
                other => {
                    return Err(ShaderParseError::UnknownStage {
                        line: index + 1,
                        stage: other.to_string(),
                    });
                }
            };
            continue;
        }

        let target = match stage {
            Stage::None => continue,
            Stage::Vertex => vertex.as_mut(),
            Stage::Fragment => fragment.as_mut(),
        };
        if let Some(buf) = target {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    let vertex = vertex.ok_or(ShaderParseError::MissingVertex)?;
    let fragment = fragment.ok_or(ShaderParseError::MissingFragment)?;

    log::debug!(
        "parsed shader source: vertex {} bytes, fragment {} bytes",
        vertex.len(),
        fragment.len()
    );

    Ok(ShaderSource { vertex, fragment })
}
