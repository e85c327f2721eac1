//! Known Collector Vocabulary
//!
//! node_exporter ships a fixed set of metrics collectors, each toggled on the
//! command line via `--collector.<name>` / `--no-collector.<name>`. The enable
//! and disable lists in [`crate::config::ExporterConfig`] are restricted to
//! this closed set; anything else is rejected before rendering.

/// Every collector name node_exporter understands, in upstream order.
pub const KNOWN_COLLECTORS: [&str; 44] = [
    "arp",
    "bcache",
    "bonding",
    "buddyinfo",
    "conntrack",
    "cpu",
    "diskstats",
    "drbd",
    "edac",
    "entropy",
    "filefd",
    "filesystem",
    "gmond",
    "hwmon",
    "infiniband",
    "interrupts",
    "ipvs",
    "ksmd",
    "loadavg",
    "logind",
    "mdadm",
    "megacli",
    "meminfo",
    "meminfo_numa",
    "mountstats",
    "netdev",
    "netstat",
    "nfs",
    "ntp",
    "qdisc",
    "runit",
    "sockstat",
    "stat",
    "supervisord",
    "systemd",
    "tcpstat",
    "textfile",
    "time",
    "uname",
    "vmstat",
    "wifi",
    "xfs",
    "zfs",
    "timex",
];

/// Case-sensitive membership test against [`KNOWN_COLLECTORS`].
pub fn is_known_collector(name: &str) -> bool {
    KNOWN_COLLECTORS.contains(&name)
}
