//! Turkish display labels for criteria, unit types and status colours.
//!
//! Results carry English explanations; these helpers supply the texts shown
//! to family physicians in the HYP screens.

use crate::models::{CriterionType, StatusColor, SupportWorkerCriterionType, UnitType};

/// Returns the on-screen guidance for a status colour.
///
/// # Examples
///
/// ```
/// use hyp_engine::calculation::status_explanation;
/// use hyp_engine::models::StatusColor;
///
/// assert_eq!(status_explanation(StatusColor::Green), "İdeal aralıkta");
/// ```
pub fn status_explanation(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Red => "Asgari Başarı Yüzdesine ulaşılamadı - Katsayı düşük, tamamlayınız!",
        StatusColor::Green => "İdeal aralıkta",
        StatusColor::Yellow => "Azami Başarı Yüzdesi Geçildi! (Devrederken %10 kaybınız olur)",
        StatusColor::Orange => "%100 değeri geçildi! Gelecek aya devir olacak!",
    }
}

/// Returns the HTML colour code used to render a status.
pub fn status_color_code(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Red => "#e74c3c",
        StatusColor::Green => "#2ecc71",
        StatusColor::Yellow => "#f1c40f",
        StatusColor::Orange => "#e67e22",
    }
}

/// Returns the Turkish display name of a criterion.
pub fn criterion_display_name(criterion: CriterionType) -> &'static str {
    match criterion {
        CriterionType::HtScreening => "HT Tarama",
        CriterionType::HtFollowUp => "HT İzlem",
        CriterionType::HtOutcome => "HT Sonuç",
        CriterionType::DmScreening => "DM Tarama",
        CriterionType::DmFollowUp => "DM İzlem",
        CriterionType::DmOutcome => "DM Sonuç",
        CriterionType::ObesityScreening => "Obezite Tarama",
        CriterionType::ObesityFollowUp => "Obezite İzlem",
        CriterionType::ObesityOutcome => "Obezite Sonuç",
        CriterionType::CvrScreening => "KVR Tarama",
        CriterionType::CvrFollowUp => "KVR İzlem",
        CriterionType::CvrOutcome => "KVR Sonuç",
        CriterionType::ElderlyScreening => "Yaşlı Tarama",
        CriterionType::ElderlyFollowUp => "Yaşlı İzlem",
        CriterionType::ElderlyOutcome => "Yaşlı Sonuç",
        CriterionType::CervicalScreening => "Serviks",
        CriterionType::ColorectalScreening => "Kolorektal",
        CriterionType::BreastScreening => "Mamografi",
        CriterionType::ProcessManagement => "Süreç Yönetimi",
    }
}

/// Returns the Turkish display name of a unit type.
pub fn unit_type_display_name(unit_type: UnitType) -> &'static str {
    match unit_type {
        UnitType::Normal => "Normal",
        UnitType::Integrated => "Entegre",
        UnitType::MandatoryLowPopulation => "Zorunlu Düşük Nüfus",
        UnitType::DetaineeFacility => "Tutuklu/Hükümlü",
    }
}

/// Returns the Turkish display name of a support-worker criterion.
pub fn support_worker_criterion_display_name(criterion: SupportWorkerCriterionType) -> &'static str {
    match criterion {
        SupportWorkerCriterionType::VitalSigns => "Vital Bulgular",
        SupportWorkerCriterionType::ElderlyAssessment => "Yaşlı Değerlendirme",
    }
}
