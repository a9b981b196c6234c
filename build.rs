use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `push-relay --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
