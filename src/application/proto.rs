// Wire messages of the cqm_sampler.HybridSampler service.
// Client and server stubs are generated by build.rs and included below.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Vartype {
    Binary = 0,
    Integer = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Sense {
    Le = 0,
    Ge = 1,
    Eq = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SamplerBackend {
    Auto = 0,
    Exact = 1,
    Milp = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Variable {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(enumeration = "Vartype", tag = "2")]
    pub vartype: i32,
    #[prost(sint64, tag = "3")]
    pub lower_bound: i64,
    #[prost(sint64, tag = "4")]
    pub upper_bound: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LinearTerm {
    #[prost(uint64, tag = "1")]
    pub variable: u64,
    #[prost(sint64, tag = "2")]
    pub coefficient: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LinearExpression {
    #[prost(message, repeated, tag = "1")]
    pub terms: ::prost::alloc::vec::Vec<LinearTerm>,
    #[prost(sint64, tag = "2")]
    pub offset: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Constraint {
    #[prost(string, tag = "1")]
    pub label: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub lhs: ::core::option::Option<LinearExpression>,
    #[prost(enumeration = "Sense", tag = "3")]
    pub sense: i32,
    #[prost(sint64, tag = "4")]
    pub rhs: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Model {
    #[prost(message, repeated, tag = "1")]
    pub variables: ::prost::alloc::vec::Vec<Variable>,
    #[prost(message, optional, tag = "2")]
    pub objective: ::core::option::Option<LinearExpression>,
    #[prost(message, repeated, tag = "3")]
    pub constraints: ::prost::alloc::vec::Vec<Constraint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SamplerParameters {
    #[prost(string, tag = "1")]
    pub label: ::prost::alloc::string::String,
    /// Seconds; absent means no limit
    #[prost(double, optional, tag = "2")]
    pub time_limit: ::core::option::Option<f64>,
    #[prost(enumeration = "SamplerBackend", tag = "3")]
    pub backend: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SampleRequest {
    #[prost(message, optional, tag = "1")]
    pub model: ::core::option::Option<Model>,
    #[prost(message, optional, tag = "2")]
    pub parameters: ::core::option::Option<SamplerParameters>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sample {
    /// One value per entry of `SampleResponse.variables`
    #[prost(sint64, repeated, tag = "1")]
    pub values: ::prost::alloc::vec::Vec<i64>,
    #[prost(sint64, tag = "2")]
    pub energy: i64,
    #[prost(bool, tag = "3")]
    pub is_feasible: bool,
    #[prost(uint32, tag = "4")]
    pub num_occurrences: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SampleResponse {
    #[prost(uint64, repeated, tag = "1")]
    pub variables: ::prost::alloc::vec::Vec<u64>,
    #[prost(message, repeated, tag = "2")]
    pub samples: ::prost::alloc::vec::Vec<Sample>,
    #[prost(string, tag = "3")]
    pub sampler: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub problem_label: ::prost::alloc::string::String,
    #[prost(double, tag = "5")]
    pub run_time_ms: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelChunk {
    #[prost(oneof = "model_chunk::Chunk", tags = "1, 2, 3, 4")]
    pub chunk: ::core::option::Option<model_chunk::Chunk>,
}

pub mod model_chunk {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Chunk {
        #[prost(message, tag = "1")]
        Parameters(super::SamplerParameters),
        #[prost(message, tag = "2")]
        Variable(super::Variable),
        #[prost(message, tag = "3")]
        Objective(super::LinearExpression),
        #[prost(message, tag = "4")]
        Constraint(super::Constraint),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SamplerInfo {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "SamplerBackend", tag = "2")]
    pub backend: i32,
    #[prost(bool, tag = "3")]
    pub supports_integer: bool,
    #[prost(string, repeated, tag = "4")]
    pub capabilities: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AvailableSamplers {
    #[prost(message, repeated, tag = "1")]
    pub samplers: ::prost::alloc::vec::Vec<SamplerInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidationResult {
    #[prost(bool, tag = "1")]
    pub is_valid: bool,
    #[prost(string, repeated, tag = "2")]
    pub errors: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "3")]
    pub warnings: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(uint32, tag = "4")]
    pub num_variables: u32,
    #[prost(uint32, tag = "5")]
    pub num_constraints: u32,
}

include!(concat!(env!("OUT_DIR"), "/cqm_sampler.HybridSampler.rs"));
