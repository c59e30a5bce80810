//! Fixed reference data shared by every seed file.
//!
//! Chart-of-account and program rows are written before any income record so
//! the foreign keys on `financialreport_comp` always resolve.

/// A row of `chartofaccount_impl`. The matching `chartofaccount_comp` row only
/// carries the `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOfAccount {
    pub id: u32,
    pub code: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub visible: bool,
}

/// A row of `program_comp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Program {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// `YYYY-MM-DD`
    pub execution_date: &'static str,
    pub logo_url: &'static str,
    pub partner: &'static str,
    pub target: &'static str,
}

/// Income accounts live in the 4xxx range.
pub const CHART_OF_ACCOUNTS: [ChartOfAccount; 5] = [
    ChartOfAccount {
        id: 401,
        code: 4001,
        name: "Sumbangan Donasi",
        description: "Pendapatan dari donasi masyarakat",
        visible: true,
    },
    ChartOfAccount {
        id: 402,
        code: 4002,
        name: "Hibah",
        description: "Pendapatan dari hibah institusi",
        visible: true,
    },
    ChartOfAccount {
        id: 403,
        code: 4003,
        name: "Jasa Layanan",
        description: "Pendapatan dari jasa layanan",
        visible: true,
    },
    ChartOfAccount {
        id: 404,
        code: 4004,
        name: "Investasi",
        description: "Pendapatan dari hasil investasi",
        visible: true,
    },
    ChartOfAccount {
        id: 405,
        code: 4005,
        name: "Lain-lain",
        description: "Pendapatan lain-lain",
        visible: true,
    },
];

pub const PROGRAMS: [Program; 3] = [
    Program {
        id: 0,
        name: "Program Umum",
        description: "Program kegiatan umum",
        execution_date: "2024-01-01",
        logo_url: "https://example.com/logo0.png",
        partner: "Internal",
        target: "Umum",
    },
    Program {
        id: 1,
        name: "Program Pendidikan",
        description: "Program bantuan pendidikan",
        execution_date: "2024-01-15",
        logo_url: "https://example.com/logo1.png",
        partner: "Yayasan Pendidikan",
        target: "Anak sekolah",
    },
    Program {
        id: 2,
        name: "Program Kesehatan",
        description: "Program kesehatan gratis",
        execution_date: "2024-02-20",
        logo_url: "https://example.com/logo2.png",
        partner: "Klinik Sehat",
        target: "Masyarakat umum",
    },
];

pub const PAYMENT_METHODS: [&str; 5] = [
    "Transfer Bank",
    "Cash",
    "E-Wallet",
    "Kartu Kredit",
    "Kartu Debit",
];

pub const DESCRIPTIONS: [&str; 10] = [
    "Donasi dari masyarakat umum",
    "Sumbangan untuk program pendidikan",
    "Hibah pemerintah",
    "Donasi perusahaan CSR",
    "Hasil investasi",
    "Pendapatan jasa konsultasi",
    "Sumbangan acara charity",
    "Donasi anonymous",
    "Hasil penjualan produk",
    "Pendapatan dari event fundraising",
];

/// Candidate program references for a record. Weighted so most records carry
/// no program (`None`); only ids present in [`PROGRAMS`] may appear.
pub const PROGRAM_CHOICES: [Option<u32>; 9] = [
    None,
    None,
    None,
    None,
    None,
    None,
    Some(0),
    Some(1),
    Some(2),
];

#[must_use]
pub fn coa_ids() -> Vec<u32> {
    CHART_OF_ACCOUNTS.iter().map(|coa| coa.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coa_ids() {
        assert_eq!(coa_ids(), vec![401, 402, 403, 404, 405]);
    }

    #[test]
    fn test_program_choices_reference_known_programs() {
        for id in PROGRAM_CHOICES.iter().flatten() {
            assert!(PROGRAMS.iter().any(|program| program.id == *id));
        }
        let absent = PROGRAM_CHOICES.iter().filter(|choice| choice.is_none()).count();
        assert!(absent > PROGRAM_CHOICES.len() / 2);
    }
}
