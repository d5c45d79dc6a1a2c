// Mappers: Convert between wire messages and domain models
// Keeps prost and tonic types out of the domain layer

use crate::domain::{
    models::{ConstrainedQuadraticModel, Constraint, LinearExpression, SamplerConfig, Variable},
    sample_set::{Sample, SampleSet, SampleSetInfo},
    sampler_service::{Result, SamplerError},
    value_objects::{SamplerBackend, Sense, VarId, Vartype},
};
use tonic::metadata::MetadataValue;
use tonic::Status;

/// Metadata key carrying the exceeded time budget on `deadline_exceeded`
const TIME_LIMIT_KEY: &str = "x-time-limit";

use super::proto;

fn var_id(raw: u64) -> Result<VarId> {
    usize::try_from(raw)
        .map(VarId)
        .map_err(|_| SamplerError::InvalidModel(format!("variable id {} out of range", raw)))
}

/// Convert wire Variable to domain Variable
pub fn proto_to_domain_variable(proto_var: &proto::Variable) -> Result<Variable> {
    let vartype = match proto::Vartype::try_from(proto_var.vartype) {
        Ok(proto::Vartype::Binary) => Vartype::Binary,
        Ok(proto::Vartype::Integer) => Vartype::Integer,
        Err(_) => {
            return Err(SamplerError::InvalidModel(format!(
                "invalid vartype {} for variable {}",
                proto_var.vartype, proto_var.id
            )))
        }
    };
    let id = var_id(proto_var.id)?;

    Ok(match vartype {
        Vartype::Binary => Variable::binary(id),
        Vartype::Integer => Variable::integer(id, proto_var.lower_bound, proto_var.upper_bound),
    })
}

/// Convert wire LinearExpression to domain LinearExpression
pub fn proto_to_domain_expression(proto_expr: &proto::LinearExpression) -> Result<LinearExpression> {
    let mut expr = LinearExpression::new().with_offset(proto_expr.offset);
    for term in &proto_expr.terms {
        expr.add_linear(var_id(term.variable)?, term.coefficient)?;
    }
    Ok(expr)
}

pub fn proto_to_domain_sense(raw: i32) -> Result<Sense> {
    match proto::Sense::try_from(raw) {
        Ok(proto::Sense::Le) => Ok(Sense::Le),
        Ok(proto::Sense::Ge) => Ok(Sense::Ge),
        Ok(proto::Sense::Eq) => Ok(Sense::Eq),
        Err(_) => Err(SamplerError::InvalidModel(format!(
            "invalid constraint sense {}",
            raw
        ))),
    }
}

/// Convert wire Constraint to domain Constraint
pub fn proto_to_domain_constraint(proto_constr: &proto::Constraint) -> Result<Constraint> {
    let lhs = match &proto_constr.lhs {
        Some(lhs) => proto_to_domain_expression(lhs)?,
        None => LinearExpression::new(),
    };
    Ok(Constraint::new(
        proto_constr.label.clone(),
        lhs,
        proto_to_domain_sense(proto_constr.sense)?,
        proto_constr.rhs,
    ))
}

/// Assemble a domain model from its wire parts. The domain model rejects
/// duplicate constraint labels and terms on undeclared variables.
pub fn assemble_model(
    variables: &[proto::Variable],
    objective: Option<&proto::LinearExpression>,
    constraints: &[proto::Constraint],
) -> Result<ConstrainedQuadraticModel> {
    let mut model = ConstrainedQuadraticModel::new();
    for var in variables {
        model.add_variable(proto_to_domain_variable(var)?)?;
    }
    if let Some(objective) = objective {
        model.set_objective(proto_to_domain_expression(objective)?)?;
    }
    for constraint in constraints {
        let c = proto_to_domain_constraint(constraint)?;
        model.add_constraint(c.lhs, c.sense, c.rhs, c.label)?;
    }
    Ok(model)
}

pub fn proto_to_domain_model(proto_model: &proto::Model) -> Result<ConstrainedQuadraticModel> {
    assemble_model(
        &proto_model.variables,
        proto_model.objective.as_ref(),
        &proto_model.constraints,
    )
}

pub fn proto_to_domain_config(params: Option<&proto::SamplerParameters>) -> Result<SamplerConfig> {
    let Some(params) = params else {
        return Ok(SamplerConfig::default());
    };
    let backend = match proto::SamplerBackend::try_from(params.backend) {
        Ok(proto::SamplerBackend::Auto) => SamplerBackend::Auto,
        Ok(proto::SamplerBackend::Exact) => SamplerBackend::Exact,
        Ok(proto::SamplerBackend::Milp) => SamplerBackend::Milp,
        Err(_) => {
            return Err(SamplerError::InvalidConfig(format!(
                "invalid sampler backend {}",
                params.backend
            )))
        }
    };
    Ok(SamplerConfig {
        backend,
        label: params.label.clone(),
        time_limit: params.time_limit,
    })
}

/// Convert a SampleRequest into its domain model and configuration
pub fn proto_to_domain_request(
    request: &proto::SampleRequest,
) -> Result<(ConstrainedQuadraticModel, SamplerConfig)> {
    let model = request
        .model
        .as_ref()
        .ok_or_else(|| SamplerError::InvalidModel("model is required".to_string()))?;
    Ok((
        proto_to_domain_model(model)?,
        proto_to_domain_config(request.parameters.as_ref())?,
    ))
}

pub fn domain_to_proto_backend(backend: SamplerBackend) -> proto::SamplerBackend {
    match backend {
        SamplerBackend::Auto => proto::SamplerBackend::Auto,
        SamplerBackend::Exact => proto::SamplerBackend::Exact,
        SamplerBackend::Milp => proto::SamplerBackend::Milp,
    }
}

pub fn domain_to_proto_variable(var: &Variable) -> proto::Variable {
    let vartype = match var.vartype {
        Vartype::Binary => proto::Vartype::Binary,
        Vartype::Integer => proto::Vartype::Integer,
    };
    proto::Variable {
        id: var.id.0 as u64,
        vartype: vartype as i32,
        lower_bound: var.lower_bound,
        upper_bound: var.upper_bound,
    }
}

pub fn domain_to_proto_expression(expr: &LinearExpression) -> proto::LinearExpression {
    proto::LinearExpression {
        terms: expr
            .terms
            .iter()
            .map(|(v, &coefficient)| proto::LinearTerm {
                variable: v.0 as u64,
                coefficient,
            })
            .collect(),
        offset: expr.offset,
    }
}

pub fn domain_to_proto_constraint(constraint: &Constraint) -> proto::Constraint {
    let sense = match constraint.sense {
        Sense::Le => proto::Sense::Le,
        Sense::Ge => proto::Sense::Ge,
        Sense::Eq => proto::Sense::Eq,
    };
    proto::Constraint {
        label: constraint.label.clone(),
        lhs: Some(domain_to_proto_expression(&constraint.lhs)),
        sense: sense as i32,
        rhs: constraint.rhs,
    }
}

pub fn domain_to_proto_model(model: &ConstrainedQuadraticModel) -> proto::Model {
    proto::Model {
        variables: model.variables.iter().map(domain_to_proto_variable).collect(),
        objective: Some(domain_to_proto_expression(&model.objective)),
        constraints: model
            .constraints
            .iter()
            .map(domain_to_proto_constraint)
            .collect(),
    }
}

pub fn domain_to_proto_parameters(config: &SamplerConfig) -> proto::SamplerParameters {
    proto::SamplerParameters {
        label: config.label.clone(),
        time_limit: config.time_limit,
        backend: domain_to_proto_backend(config.backend) as i32,
    }
}

pub fn domain_to_proto_request(
    model: &ConstrainedQuadraticModel,
    config: &SamplerConfig,
) -> proto::SampleRequest {
    proto::SampleRequest {
        model: Some(domain_to_proto_model(model)),
        parameters: Some(domain_to_proto_parameters(config)),
    }
}

/// Split a model into upload chunks: parameters first, then variables,
/// the objective and one chunk per constraint.
pub fn domain_to_proto_chunks(
    model: &ConstrainedQuadraticModel,
    config: &SamplerConfig,
) -> Vec<proto::ModelChunk> {
    use proto::model_chunk::Chunk;

    std::iter::once(Chunk::Parameters(domain_to_proto_parameters(config)))
        .chain(
            model
                .variables
                .iter()
                .map(|v| Chunk::Variable(domain_to_proto_variable(v))),
        )
        .chain(std::iter::once(Chunk::Objective(domain_to_proto_expression(
            &model.objective,
        ))))
        .chain(
            model
                .constraints
                .iter()
                .map(|c| Chunk::Constraint(domain_to_proto_constraint(c))),
        )
        .map(|chunk| proto::ModelChunk { chunk: Some(chunk) })
        .collect()
}

/// Convert domain SampleSet to wire SampleResponse
pub fn domain_to_proto_sampleset(sampleset: &SampleSet) -> proto::SampleResponse {
    proto::SampleResponse {
        variables: sampleset.variables.iter().map(|v| v.0 as u64).collect(),
        samples: sampleset
            .iter()
            .map(|s| proto::Sample {
                values: sampleset.variables.iter().map(|&v| s.value(v)).collect(),
                energy: s.energy,
                is_feasible: s.is_feasible,
                num_occurrences: s.num_occurrences,
            })
            .collect(),
        sampler: sampleset.info.sampler.clone(),
        problem_label: sampleset.info.problem_label.clone(),
        run_time_ms: sampleset.info.run_time_ms,
    }
}

/// Convert wire SampleResponse to domain SampleSet
pub fn proto_to_domain_sampleset(response: proto::SampleResponse) -> Result<SampleSet> {
    let variables = response
        .variables
        .iter()
        .map(|&v| var_id(v))
        .collect::<Result<Vec<_>>>()?;

    let samples = response
        .samples
        .into_iter()
        .map(|s| {
            if s.values.len() != variables.len() {
                return Err(SamplerError::Remote(format!(
                    "sample has {} values for {} variables",
                    s.values.len(),
                    variables.len()
                )));
            }
            Ok(Sample {
                assignment: variables.iter().copied().zip(s.values).collect(),
                energy: s.energy,
                is_feasible: s.is_feasible,
                num_occurrences: s.num_occurrences,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SampleSet::new(
        variables,
        samples,
        SampleSetInfo {
            sampler: response.sampler,
            problem_label: response.problem_label,
            run_time_ms: response.run_time_ms,
        },
    ))
}

/// Map a domain error to the gRPC status reported to clients
pub fn error_to_status(error: SamplerError) -> Status {
    match error {
        SamplerError::InvalidModel(_)
        | SamplerError::InvalidConfig(_)
        | SamplerError::Unsupported { .. } => Status::invalid_argument(error.to_string()),
        SamplerError::TimeLimit(limit) => {
            let mut status = Status::deadline_exceeded(error.to_string());
            if let Ok(value) = MetadataValue::try_from(limit.to_string()) {
                status.metadata_mut().insert(TIME_LIMIT_KEY, value);
            }
            status
        }
        _ => Status::internal(format!("Sampler error: {}", error)),
    }
}

/// Map a gRPC status received by a client back to a domain error
pub fn status_to_error(status: Status) -> SamplerError {
    match status.code() {
        tonic::Code::InvalidArgument => SamplerError::InvalidModel(status.message().to_string()),
        tonic::Code::DeadlineExceeded => {
            let limit = status
                .metadata()
                .get(TIME_LIMIT_KEY)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok());
            match limit {
                Some(limit) => SamplerError::TimeLimit(limit),
                None => SamplerError::Remote(format!("deadline exceeded: {}", status.message())),
            }
        }
        tonic::Code::Unavailable => SamplerError::Transport(status.message().to_string()),
        _ => SamplerError::Remote(status.message().to_string()),
    }
}
