//! Common test utilities for integration tests.
//!
//! Canned controller responses and a mock fleet used across the audit tests.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use chrono::NaiveDate;
use controller::{ContentPackage, MockController, OperationalCommand, Session};
use fake::faker::internet::en::Username;
use fake::Fake;

pub const FW_A: &str = "007951000100001";
pub const FW_B: &str = "007951000100002";

/// Date license expiry is measured against in these tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub fn session() -> Session {
    Session::from_api_key("LUFRPT1-test-key")
}

/// Wraps a result body in a success envelope.
pub fn ok(result: &str) -> String {
    format!(
        r#"<response status="success"><result>{}</result></response>"#,
        result
    )
}

pub fn random_hostname() -> String {
    format!("fw-{}", Username().fake::<String>())
}

pub fn devices_xml(devices: &[(&str, &str)]) -> String {
    let entries: String = devices
        .iter()
        .map(|(serial, hostname)| {
            format!(
                "<entry name=\"{serial}\"><serial>{serial}</serial><hostname>{hostname}</hostname><model>PA-3220</model></entry>"
            )
        })
        .collect();
    ok(&format!("<devices>{}</devices>", entries))
}

pub fn upgrade_check_xml(version: &str) -> String {
    ok(&format!(
        "<content-updates><entry><version>{}</version><current>no</current><latest>yes</latest></entry></content-updates>",
        version
    ))
}

pub fn upgrade_info_xml(version: &str) -> String {
    ok(&format!(
        "<content-updates><current-version>{}</current-version></content-updates>",
        version
    ))
}

pub fn system_info_xml(sw_version: &str, url_version: &str) -> String {
    ok(&format!(
        "<system><sw-version>{}</sw-version><url-filtering-version>{}</url-filtering-version></system>",
        sw_version, url_version
    ))
}

pub fn software_check_xml(latest: &str) -> String {
    ok(&format!(
        "<sw-updates><versions><entry><version>{}</version><latest>yes</latest></entry></versions></sw-updates>",
        latest
    ))
}

pub fn licenses_xml(entries: &[(&str, &str)]) -> String {
    let body: String = entries
        .iter()
        .map(|(feature, expires)| {
            format!("<entry><feature>{feature}</feature><expires>{expires}</expires></entry>")
        })
        .collect();
    ok(&format!("<licenses>{}</licenses>", body))
}

pub const JOBS_XML: &str = r#"<response status="success"><result>
    <job>
        <id>201</id><type>Commit</type><status>FIN</status><result>OK</result>
        <devices>
            <entry><devicename>fw-a</devicename><serial-no>007951000100001</serial-no><status>commit succeeded</status><result>success</result></entry>
            <entry><devicename>fw-b</devicename><serial-no>007951000100002</serial-no><status>commit failed</status><result>Device unreachable, fail</result></entry>
        </devices>
    </job>
    <job>
        <id>202</id><type>Push</type><status>FIN</status><result>OK</result>
        <devices>
            <entry><devicename>fw-a</devicename><serial-no>007951000100001</serial-no><status>pushed</status><result>OK with warning</result></entry>
        </devices>
    </job>
    <job>
        <id>203</id><type>Commit</type><status>PEND</status>
    </job>
</result></response>"#;

/// Controller with latest content versions published.
pub fn controller_with_latest() -> MockController {
    MockController::new()
        .respond(
            OperationalCommand::ContentUpgradeCheck(ContentPackage::AppThreat),
            None,
            &upgrade_check_xml("8795-8489"),
        )
        .respond(
            OperationalCommand::ContentUpgradeCheck(ContentPackage::Antivirus),
            None,
            &upgrade_check_xml("4868-5386"),
        )
        .respond(
            OperationalCommand::ContentUpgradeCheck(ContentPackage::Wildfire),
            None,
            &upgrade_check_xml("850712-854530"),
        )
}

/// Two-device fleet: FW_A fully current, FW_B behind with an expired license.
pub fn fleet_controller() -> MockController {
    let a = Some(FW_A);
    let b = Some(FW_B);
    controller_with_latest()
        .respond(
            OperationalCommand::ListDevices,
            None,
            &devices_xml(&[(FW_A, "fw-a"), (FW_B, "fw-b")]),
        )
        .respond(OperationalCommand::SystemInfo, a, &system_info_xml("11.1.2", "20250601.20001"))
        .respond(OperationalCommand::SystemInfo, b, &system_info_xml("10.2.4", "20250301.20001"))
        .respond(OperationalCommand::SoftwareCheck, a, &software_check_xml("11.1.2"))
        .respond(OperationalCommand::SoftwareCheck, b, &software_check_xml("11.1.2"))
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::AppThreat),
            a,
            &upgrade_info_xml("8795-8489"),
        )
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::Antivirus),
            a,
            &upgrade_info_xml("4868-5386"),
        )
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::Wildfire),
            a,
            &upgrade_info_xml("850712-854530"),
        )
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::AppThreat),
            b,
            &upgrade_info_xml("8790-8470"),
        )
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::Antivirus),
            b,
            &upgrade_info_xml("4868-5386"),
        )
        .respond(
            OperationalCommand::ContentUpgradeInfo(ContentPackage::Wildfire),
            b,
            &upgrade_info_xml("850700-854500"),
        )
        .respond(
            OperationalCommand::LicenseInfo,
            a,
            &licenses_xml(&[
                ("Threat Prevention", "2027/01/01"),
                ("Antivirus", "2027/01/01"),
                ("WildFire License", "2027/01/01"),
                ("PAN-DB URL Filtering", "2027/01/01"),
            ]),
        )
        .respond(
            OperationalCommand::LicenseInfo,
            b,
            &licenses_xml(&[
                ("Threat Prevention", "2020/01/01"),
                ("WildFire License", "2025/08/30"),
                ("PAN-DB URL Filtering", "Never"),
            ]),
        )
        .respond(OperationalCommand::JobList, None, JOBS_XML)
}
