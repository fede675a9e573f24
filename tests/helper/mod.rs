//! Shared fixtures for integration tests

use module_registry::registry::Module;

/// The canonical four-module catalog used across the HTTP tests.
pub fn sample_modules() -> Vec<Module> {
    vec![
        module(
            "GoogleCloudPlatform",
            "lb-http",
            "1.0.4",
            "google",
            "Modular Global HTTP Load Balancer for GCE using forwarding rules.",
            "https://github.com/GoogleCloudPlatform/terraform-google-lb-http",
            "2017-10-17T01:22:17.792066Z",
        ),
        module(
            "terraform-aws-modules",
            "vpc",
            "1.5.1",
            "aws",
            "Terraform module which creates VPC resources on AWS",
            "https://github.com/terraform-aws-modules/terraform-aws-vpc",
            "2017-11-23T10:48:09.400166Z",
        ),
        module(
            "zoitech",
            "network",
            "0.0.3",
            "aws",
            "This module is intended to be used for configuring an AWS network.",
            "https://github.com/zoitech/terraform-aws-network",
            "2017-11-23T15:12:06.620059Z",
        ),
        module(
            "Azure",
            "network",
            "1.1.1",
            "azurerm",
            "Terraform Azure RM Module for Network",
            "https://github.com/Azure/terraform-azurerm-network",
            "2017-11-22T17:15:34.325436Z",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn module(
    namespace: &str,
    name: &str,
    version: &str,
    provider: &str,
    description: &str,
    source: &str,
    published_at: &str,
) -> Module {
    Module {
        id: format!("{namespace}/{name}/{provider}/{version}"),
        owner: String::new(),
        namespace: namespace.to_string(),
        name: name.to_string(),
        version: version.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
        source: source.to_string(),
        published_at: published_at.to_string(),
    }
}
