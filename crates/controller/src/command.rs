//! Supported operational commands and their XML templates.

use domain::models::PackageName;

/// Dynamic content package with its own upgrade info/check commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentPackage {
    AppThreat,
    Antivirus,
    Wildfire,
}

impl ContentPackage {
    pub const ALL: [ContentPackage; 3] = [
        ContentPackage::AppThreat,
        ContentPackage::Antivirus,
        ContentPackage::Wildfire,
    ];

    /// Content package backing a tracked package, if it has upgrade commands.
    pub fn for_package(package: PackageName) -> Option<Self> {
        match package {
            PackageName::AppThreat => Some(ContentPackage::AppThreat),
            PackageName::Antivirus => Some(ContentPackage::Antivirus),
            PackageName::Wildfire => Some(ContentPackage::Wildfire),
            PackageName::UrlFiltering | PackageName::Firmware => None,
        }
    }

    pub fn package(&self) -> PackageName {
        match self {
            ContentPackage::AppThreat => PackageName::AppThreat,
            ContentPackage::Antivirus => PackageName::Antivirus,
            ContentPackage::Wildfire => PackageName::Wildfire,
        }
    }

    /// Element name the controller uses for this package in upgrade commands.
    fn element(&self) -> &'static str {
        match self {
            ContentPackage::AppThreat => "content",
            ContentPackage::Antivirus => "anti-virus",
            ContentPackage::Wildfire => "wildfire",
        }
    }
}

/// A read-only operational command understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationalCommand {
    ListDevices,
    SystemInfo,
    ContentUpgradeInfo(ContentPackage),
    ContentUpgradeCheck(ContentPackage),
    /// Only "latest" lookup sent per device; firmware availability differs by model.
    SoftwareCheck,
    LicenseInfo,
    JobList,
}

impl OperationalCommand {
    /// Stable name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            OperationalCommand::ListDevices => "list-devices",
            OperationalCommand::SystemInfo => "system-info",
            OperationalCommand::ContentUpgradeInfo(_) => "content-upgrade-info",
            OperationalCommand::ContentUpgradeCheck(_) => "content-upgrade-check",
            OperationalCommand::SoftwareCheck => "software-check",
            OperationalCommand::LicenseInfo => "license-info",
            OperationalCommand::JobList => "job-list",
        }
    }

    /// The `cmd` parameter sent to the controller.
    pub fn to_xml(&self) -> String {
        match self {
            OperationalCommand::ListDevices => {
                "<show><devices><connected></connected></devices></show>".to_string()
            }
            OperationalCommand::SystemInfo => {
                "<show><system><info></info></system></show>".to_string()
            }
            OperationalCommand::ContentUpgradeInfo(package) => upgrade_xml(*package, "info"),
            OperationalCommand::ContentUpgradeCheck(package) => upgrade_xml(*package, "check"),
            OperationalCommand::SoftwareCheck => {
                "<request><system><software><check></check></software></system></request>"
                    .to_string()
            }
            OperationalCommand::LicenseInfo => {
                "<request><license><info></info></license></request>".to_string()
            }
            OperationalCommand::JobList => "<show><jobs><all></all></jobs></show>".to_string(),
        }
    }
}

impl std::fmt::Display for OperationalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationalCommand::ContentUpgradeInfo(p) | OperationalCommand::ContentUpgradeCheck(p) => {
                write!(f, "{}({})", self.name(), p.element())
            }
            _ => f.write_str(self.name()),
        }
    }
}

fn upgrade_xml(package: ContentPackage, action: &str) -> String {
    let element = package.element();
    format!(
        "<request><{element}><upgrade><{action}></{action}></upgrade></{element}></request>"
    )
}
