mod infrastructure;

pub use infrastructure::{
    Infrastructure, InfrastructureSpec, InfrastructureStatus, PLATFORM_TYPE_POWERVS,
    PlatformStatus, PowerVSPlatformStatus, PowerVSServiceEndpoint,
};
