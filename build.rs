// Generates the HybridSampler gRPC client and server stubs.
// Messages are hand-written prost types in src/application/proto.rs, so no
// .proto compilation (and no protoc) is involved.

use tonic_build::manual::{Builder, Method, Service};

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    let hybrid_sampler = Service::builder()
        .name("HybridSampler")
        .package("cqm_sampler")
        .comment("Samples constrained quadratic models under a time budget.")
        .method(method(
            "sample_cqm",
            "SampleCqm",
            "super::SampleRequest",
            "super::SampleResponse",
        ))
        .method(
            Method::builder()
                .name("sample_cqm_stream")
                .route_name("SampleCqmStream")
                .input_type("super::ModelChunk")
                .output_type("super::SampleResponse")
                .codec_path("tonic::codec::ProstCodec")
                .client_streaming()
                .build(),
        )
        .method(method(
            "list_samplers",
            "ListSamplers",
            "super::Empty",
            "super::AvailableSamplers",
        ))
        .method(method(
            "validate_model",
            "ValidateModel",
            "super::SampleRequest",
            "super::ValidationResult",
        ))
        .build();

    Builder::new().compile(&[hybrid_sampler]);

    println!("cargo:rerun-if-changed=build.rs");
}
