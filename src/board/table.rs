use super::{Board, PartitionNames};
use crate::safeloader::meta::{SoftVersion, Trailer};

/// Flash layout shared by the CPE210 and CPE510 families
const CPE_LAYOUT: &[(&str, u32, u32)] = &[
    ("fs-uboot", 0x00000, 0x20000),
    ("partition-table", 0x20000, 0x02000),
    ("default-mac", 0x30000, 0x00020),
    ("product-info", 0x31100, 0x00100),
    ("signature", 0x32000, 0x00400),
    ("firmware", 0x40000, 0x770000),
    ("soft-version", 0x7b0000, 0x00100),
    ("support-list", 0x7b1000, 0x00400),
    ("user-config", 0x7c0000, 0x10000),
    ("default-config", 0x7d0000, 0x10000),
    ("log", 0x7e0000, 0x10000),
    ("radio", 0x7f0000, 0x10000),
];

pub static BOARDS: &[Board] = &[
    Board {
        id: "CPE210",
        vendor: Some("CPE510(TP-LINK|UN|N300-5):1.0\r\n"),
        support_list: "SupportList:\r\n\
                       CPE210(TP-LINK|UN|N300-2):1.0\r\n\
                       CPE210(TP-LINK|UN|N300-2):1.1\r\n\
                       CPE210(TP-LINK|US|N300-2):1.1\r\n\
                       CPE210(TP-LINK|EU|N300-2):1.1\r\n\
                       CPE220(TP-LINK|UN|N300-2):1.1\r\n\
                       CPE220(TP-LINK|US|N300-2):1.1\r\n\
                       CPE220(TP-LINK|EU|N300-2):1.1\r\n",
        trailer: Trailer::Pad(0xff),
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 0,
        partitions: CPE_LAYOUT,
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "support-list",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "CPE510",
        vendor: Some("CPE510(TP-LINK|UN|N300-5):1.0\r\n"),
        support_list: "SupportList:\r\n\
                       CPE510(TP-LINK|UN|N300-5):1.0\r\n\
                       CPE510(TP-LINK|UN|N300-5):1.1\r\n\
                       CPE510(TP-LINK|UN|N300-5):1.1\r\n\
                       CPE510(TP-LINK|US|N300-5):1.1\r\n\
                       CPE510(TP-LINK|CA|N300-5):1.1\r\n\
                       CPE510(TP-LINK|EU|N300-5):1.1\r\n\
                       CPE520(TP-LINK|UN|N300-5):1.1\r\n\
                       CPE520(TP-LINK|US|N300-5):1.1\r\n\
                       CPE520(TP-LINK|EU|N300-5):1.1\r\n",
        trailer: Trailer::Pad(0xff),
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 0,
        partitions: CPE_LAYOUT,
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "support-list",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "CPE605V1",
        vendor: Some("CPE605(TP-LINK|UN|N150-5):1.0\r\n"),
        support_list: "SupportList:\r\n\
                       CPE605(TP-LINK|UN|N150-5|00000000):1.0\r\n\
                       CPE605(TP-LINK|EU|N150-5|45550000):1.0\r\n\
                       CPE605(TP-LINK|US|N150-5|55530000):1.0\r\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 0,
        partitions: &[
            ("fs-uboot", 0x00000, 0x20000),
            ("partition-table", 0x20000, 0x02000),
            ("default-mac", 0x30000, 0x00020),
            ("serial-number", 0x30100, 0x00020),
            ("product-info", 0x31100, 0x00100),
            ("device-info", 0x31400, 0x00400),
            ("signature", 0x32000, 0x00400),
            ("device-id", 0x33000, 0x00100),
            ("firmware", 0x40000, 0x770000),
            ("soft-version", 0x7b0000, 0x00100),
            ("support-list", 0x7b1000, 0x01000),
            ("user-config", 0x7c0000, 0x10000),
            ("default-config", 0x7d0000, 0x10000),
            ("log", 0x7e0000, 0x10000),
            ("radio", 0x7f0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "support-list",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "ARCHER-A7-V5",
        vendor: None,
        support_list: "SupportList:\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:45550000}\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:55530000}\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:43410000}\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:4A500000}\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:54570000}\n\
                       {product_name:Archer A7,product_ver:5.0.0,special_id:52550000}\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Text("soft_ver:7.0.0\n"),
        compat_level: 0,
        partitions: &[
            ("factory-boot", 0x00000, 0x20000),
            ("fs-uboot", 0x20000, 0x20000),
            ("firmware", 0x40000, 0xec0000),
            ("default-mac", 0xf40000, 0x00200),
            ("pin", 0xf40200, 0x00200),
            ("device-id", 0xf40400, 0x00100),
            ("product-info", 0xf40500, 0x0fb00),
            ("soft-version", 0xf50000, 0x00100),
            ("extra-para", 0xf51000, 0x01000),
            ("support-list", 0xf52000, 0x0a000),
            ("profile", 0xf5c000, 0x04000),
            ("default-config", 0xf60000, 0x10000),
            ("user-config", 0xf70000, 0x40000),
            ("certificate", 0xfb0000, 0x10000),
            ("partition-table", 0xfc0000, 0x10000),
            ("log", 0xfd0000, 0x20000),
            ("radio", 0xff0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "ARCHER-C6-V2",
        vendor: Some(""),
        support_list: "SupportList:\r\n\
                       {product_name:Archer A6,product_ver:2.0.0,special_id:45550000}\r\n\
                       {product_name:Archer A6,product_ver:2.0.0,special_id:52550000}\r\n\
                       {product_name:Archer C6,product_ver:2.0.0,special_id:45550000}\r\n\
                       {product_name:Archer C6,product_ver:2.0.0,special_id:52550000}\r\n\
                       {product_name:Archer C6,product_ver:2.0.0,special_id:4A500000}\r\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Text("soft_ver:1.9.1\n"),
        compat_level: 0,
        partitions: &[
            ("fs-uboot", 0x00000, 0x20000),
            ("default-mac", 0x20000, 0x00200),
            ("pin", 0x20200, 0x00100),
            ("product-info", 0x20300, 0x00200),
            ("device-id", 0x20500, 0x0fb00),
            ("firmware", 0x30000, 0x7a9400),
            ("soft-version", 0x7d9400, 0x00100),
            ("extra-para", 0x7d9500, 0x00100),
            ("support-list", 0x7d9600, 0x00200),
            ("profile", 0x7d9800, 0x03000),
            ("default-config", 0x7dc800, 0x03000),
            ("partition-table", 0x7df800, 0x00800),
            ("user-config", 0x7e0000, 0x0c000),
            ("certificate", 0x7ec000, 0x04000),
            ("radio", 0x7f0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "ARCHER-C6-V2-US",
        vendor: Some(""),
        support_list: "SupportList:\n\
                       {product_name:Archer A6,product_ver:2.0.0,special_id:55530000}\n\
                       {product_name:Archer A6,product_ver:2.0.0,special_id:54570000}\n\
                       {product_name:Archer C6,product_ver:2.0.0,special_id:55530000}\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Text("soft_ver:1.9.1\n"),
        compat_level: 0,
        partitions: &[
            ("factory-boot", 0x00000, 0x20000),
            ("default-mac", 0x20000, 0x00200),
            ("pin", 0x20200, 0x00100),
            ("product-info", 0x20300, 0x00200),
            ("device-id", 0x20500, 0x0fb00),
            ("fs-uboot", 0x30000, 0x20000),
            ("firmware", 0x50000, 0xf89400),
            ("soft-version", 0xfd9400, 0x00100),
            ("extra-para", 0xfd9500, 0x00100),
            ("support-list", 0xfd9600, 0x00200),
            ("profile", 0xfd9800, 0x03000),
            ("default-config", 0xfdc800, 0x03000),
            ("partition-table", 0xfdf800, 0x00800),
            ("user-config", 0xfe0000, 0x0c000),
            ("certificate", 0xfec000, 0x04000),
            ("radio", 0xff0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "DECO-M5",
        vendor: Some(""),
        support_list: "SupportList:\n\
                       {product_name:M5,product_ver:1.0.0,special_id:55530000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:45550000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:43410000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:4A500000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:41550000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:4B520000}\n\
                       {product_name:M5,product_ver:1.0.0,special_id:49440000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:55530000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:45550000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:43410000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:4A500000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:41550000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:4B520000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:49440000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:53570000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:42340000}\n\
                       {product_name:M5,product_ver:3.0.0,special_id:54570000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:55530000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:45550000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:43410000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:4A500000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:41550000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:4B520000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:49440000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:53570000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:42340000}\n\
                       {product_name:M5,product_ver:3.2.0,special_id:54570000}\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 0,
        partitions: &[
            ("SBL1", 0x00000, 0x30000),
            ("boot-config_0", 0x30000, 0x10000),
            ("MIBIB", 0x40000, 0x10000),
            ("boot-config_1", 0x50000, 0x10000),
            ("QSEE", 0x60000, 0x60000),
            ("CDT", 0xc0000, 0x10000),
            ("DDRPARAMS", 0xd0000, 0x10000),
            ("uboot-env", 0xe0000, 0x10000),
            ("fs-uboot@0", 0xf0000, 0x80000),
            ("radio", 0x170000, 0x0fff0),
            ("bluetooth-XTAL", 0x17fff0, 0x00010),
            ("default-mac", 0x180000, 0x01000),
            ("device-id", 0x182000, 0x01000),
            ("product-info", 0x183000, 0x05000),
            ("support-list", 0x190000, 0x10000),
            ("user-config", 0x200000, 0x10000),
            ("device-config", 0x210000, 0x10000),
            ("group-info", 0x220000, 0x10000),
            ("partition-table@0", 0x230000, 0x02000),
            ("os-image@0", 0x240000, 0x300000),
            ("file-system@0", 0x540000, 0x790000),
            ("soft-version@0", 0xcd0000, 0x10000),
            ("profile@0", 0xce0000, 0x10000),
            ("default-config@0", 0xcf0000, 0x10000),
            ("partition-table@1", 0xd00000, 0x02000),
            ("fs-uboot@1", 0xd10000, 0x80000),
            ("os-image@1", 0xd90000, 0x400000),
            ("file-system@1", 0x1190000, 0xc40000),
            ("soft-version@1", 0x1dd0000, 0x10000),
            ("profile@1", 0x1de0000, 0x10000),
            ("default-config@1", 0x1df0000, 0x10000),
            ("tm-sig", 0x1e00000, 0x200000),
        ],
        first_sysupgrade_partition: "os-image@1",
        last_sysupgrade_partition: "file-system@1",
        partition_names: PartitionNames {
            partition_table: "partition-table@1",
            soft_version: "soft-version@1",
            os_image: "os-image@1",
            file_system: "file-system@1",
            ..PartitionNames::DEFAULT
        },
    },
    Board {
        id: "EAP235-WALL-V1",
        vendor: None,
        support_list: "SupportList:\r\n\
                       EAP235-Wall(TP-Link|UN|AC1200-D):1.0\r\n",
        trailer: Trailer::None,
        soft_version: SoftVersion::Numeric(3, 0, 0),
        compat_level: 1,
        partitions: &[
            ("fs-uboot", 0x00000, 0x80000),
            ("partition-table", 0x80000, 0x02000),
            ("default-mac", 0x90000, 0x01000),
            ("support-list", 0x91000, 0x00100),
            ("product-info", 0x91100, 0x00400),
            ("soft-version", 0x92000, 0x00100),
            ("firmware", 0xa0000, 0xd20000),
            ("user-config", 0xdc0000, 0x30000),
            ("mutil-log", 0xf30000, 0x80000),
            ("oops", 0xfb0000, 0x40000),
            ("radio", 0xff0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "EAP245-V3",
        vendor: None,
        // The last entry carries no line terminator
        support_list: "SupportList:\r\n\
                       EAP245(TP-Link|UN|AC1750-D):3.0\r\n\
                       EAP265 HD(TP-Link|UN|AC1750-D):1.0",
        trailer: Trailer::None,
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 1,
        partitions: &[
            ("factroy-boot", 0x00000, 0x40000),
            ("fs-uboot", 0x40000, 0x40000),
            ("partition-table", 0x80000, 0x10000),
            ("default-mac", 0x90000, 0x01000),
            ("support-list", 0x91000, 0x00100),
            ("product-info", 0x91100, 0x00400),
            ("soft-version", 0x92000, 0x00100),
            ("radio", 0xa0000, 0x10000),
            ("extra-para", 0xb0000, 0x10000),
            ("firmware", 0xc0000, 0xe40000),
            ("config", 0xf00000, 0x30000),
            ("mutil-log", 0xf30000, 0x80000),
            ("oops", 0xfb0000, 0x40000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "EAP615-WALL-V1",
        vendor: None,
        support_list: "SupportList:\r\n\
                       EAP615-Wall(TP-Link|UN|AX1800-D):1.0\r\n\
                       EAP615-Wall(TP-Link|CA|AX1800-D):1.0\r\n\
                       EAP615-Wall(TP-Link|JP|AX1800-D):1.0\r\n",
        trailer: Trailer::None,
        soft_version: SoftVersion::Numeric(0, 0, 0),
        compat_level: 2,
        partitions: &[
            ("fs-uboot", 0x00000, 0x80000),
            ("partition-table", 0x80000, 0x02000),
            ("default-mac", 0x90000, 0x01000),
            ("support-list", 0x91000, 0x00100),
            ("product-info", 0x91100, 0x00400),
            ("soft-version", 0x92000, 0x00100),
            ("firmware", 0xa0000, 0xcf0000),
            ("user-config", 0xd90000, 0x60000),
            ("mutil-log", 0xf30000, 0x80000),
            ("oops", 0xfb0000, 0x40000),
            ("radio", 0xff0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
    Board {
        id: "TL-WA1201-V2",
        vendor: Some(""),
        support_list: "SupportList:\n\
                       {product_name:TL-WA1201,product_ver:2.0.0,special_id:45550000}\n\
                       {product_name:TL-WA1201,product_ver:2.0.0,special_id:55530000}\n",
        trailer: Trailer::Pad(0x00),
        soft_version: SoftVersion::Text("soft_ver:1.0.1 Build 20200709 rel.66244\n"),
        compat_level: 0,
        partitions: &[
            ("fs-uboot", 0x00000, 0x20000),
            ("default-mac", 0x20000, 0x00200),
            ("pin", 0x20200, 0x00100),
            ("product-info", 0x20300, 0x00200),
            ("device-id", 0x20500, 0x0fb00),
            ("firmware", 0x30000, 0xce0000),
            ("portal-logo", 0xd10000, 0x20000),
            ("portal-back", 0xd30000, 0x200000),
            ("soft-version", 0xf30000, 0x00200),
            ("extra-para", 0xf30200, 0x00200),
            ("support-list", 0xf30400, 0x00200),
            ("profile", 0xf30600, 0x0fa00),
            ("apdef-config", 0xf40000, 0x10000),
            ("ap-config", 0xf50000, 0x10000),
            ("redef-config", 0xf60000, 0x10000),
            ("re-config", 0xf70000, 0x10000),
            ("multidef-config", 0xf80000, 0x10000),
            ("multi-config", 0xf90000, 0x10000),
            ("clientdef-config", 0xfa0000, 0x10000),
            ("client-config", 0xfb0000, 0x10000),
            ("partition-table", 0xfc0000, 0x10000),
            ("user-config", 0xfd0000, 0x10000),
            ("certificate", 0xfe0000, 0x10000),
            ("radio", 0xff0000, 0x10000),
        ],
        first_sysupgrade_partition: "os-image",
        last_sysupgrade_partition: "file-system",
        partition_names: PartitionNames::DEFAULT,
    },
];
