//! Remote shell commands for the telemetry battery
//!
//! Every command is issued as its own gateway call so the whole battery can
//! run concurrently. Wherever a command's natural output is free text, the
//! command itself reshapes it into comma-delimited fields with awk/printf so
//! the client-side parsers stay simple line splitters.
//!
//! Aggregated commands (cron, autostart, firewall) join several independent
//! sub-sources with `;`. Each sub-source is silenced with `2>/dev/null` and
//! tags its own lines with a trailing source/tool field, so a missing file
//! or tool contributes zero lines instead of corrupting its neighbors.

/// Remote hostname
pub const HOSTNAME: &str = "hostname";

/// Human-readable uptime; `-p` is not universal, plain `uptime` is the fallback
pub const UPTIME: &str = "uptime -p 2>/dev/null || uptime";

/// Raw load averages
pub const LOADAVG: &str = "cat /proc/loadavg 2>/dev/null";

/// The three meminfo lines the memory parser consumes
pub const MEMINFO: &str = "grep -E '^(MemTotal|MemFree|MemAvailable):' /proc/meminfo";

/// POSIX-format df listing with human-readable sizes
pub const DISK: &str = "df -hP 2>/dev/null";

/// CPU model line followed by the logical core count
pub const CPU_INFO: &str = "grep -m1 'model name' /proc/cpuinfo; nproc";

/// Single top iteration; only the aggregate Cpu(s) line is of interest
pub const CPU_USAGE: &str = "top -bn1 2>/dev/null | grep -i 'cpu(s)' | head -1";

/// Full interface listing for the two-pass interface parser
pub const INTERFACES: &str = "ip addr 2>/dev/null";

/// Resolver configuration (`nameserver` lines)
pub const DNS: &str = "cat /etc/resolv.conf 2>/dev/null";

/// Default route (`default via <addr>` line)
pub const GATEWAY: &str = "ip route show default 2>/dev/null";

/// Interface byte counters, header lines stripped remotely
pub const NET_DEV: &str = "tail -n +3 /proc/net/dev 2>/dev/null";

/// Running process count
pub const PROCESS_COUNT: &str = "ps -e --no-headers 2>/dev/null | wc -l";

/// Logged-in user count
pub const USER_COUNT: &str = "who 2>/dev/null | wc -l";

/// Established-connection count alternatives, preferred first.
///
/// `wc -l` terminates both pipelines so an empty match still exits zero;
/// a missing tool fails the attempt and the resolver moves on.
pub const CONNECTION_COUNT_CHAIN: [&str; 2] = [
    "ss -tun state established 2>/dev/null | tail -n +2 | wc -l",
    "netstat -tun 2>/dev/null | grep ESTABLISHED | wc -l",
];

/// Connection listing alternatives, preferred first.
///
/// The first two attribute connections to processes; the last is the
/// degraded form without process attribution (the parser fills
/// `unknown`/`-`). Each line is `protocol,local,foreign,state,process,pid`.
pub const CONNECTION_DETAIL_CHAIN: [&str; 3] = [
    // ss with process info: the sed strips the users:(...) wrapper down to
    // `name pid`, which awk then emits as the last two fields
    r##"ss -tunap 2>/dev/null | tail -n +2 | sed -E 's/users:\(\("([^"]+)",pid=([0-9]+).*/\1 \2/' | awk '{printf "%s,%s,%s,%s,%s,%s\n", $1, $5, $6, $2, (NF>=7?$7:"unknown"), (NF>=8?$8:"-")}'"##,
    // netstat: PID/Program arrives as one slash-joined column
    r##"netstat -tunap 2>/dev/null | tail -n +3 | awk '{split($7,a,"/"); printf "%s,%s,%s,%s,%s,%s\n", $1, $4, $5, $6, (a[2]==""?"unknown":a[2]), (a[1]==""?"-":a[1])}'"##,
    // degraded: no process attribution at all
    r##"ss -tuna 2>/dev/null | tail -n +2 | awk '{printf "%s,%s,%s,%s,unknown,-\n", $1, $5, $6, $2}'"##,
];

/// Top processes by CPU, capped at `rows`. Six comma fields per line; the
/// command keeps its embedded spaces because awk rejoins everything from
/// the sixth field on.
#[must_use]
pub fn processes(rows: u32) -> String {
    format!(
        r##"ps -eo pid,user,stat,pcpu,pmem,args --sort=-pcpu --no-headers 2>/dev/null | head -{rows} | awk '{{printf "%s,%s,%s,%s,%s,", $1, $2, $3, $4, $5; out=""; for(i=6;i<=NF;i++) out=out (i>6?" ":"") $i; print out}}'"##
    )
}

/// Service listing capped at `rows`: `name,active-state,enabled-state,description`.
/// is-enabled runs per unit inside the loop; units that predate unit files
/// report `unknown`.
#[must_use]
pub fn services(rows: u32) -> String {
    format!(
        r##"systemctl list-units --type=service --all --no-pager --no-legend --plain 2>/dev/null | head -{rows} | while read -r unit load active sub desc; do printf '%s,%s,%s,%s\n' "${{unit%.service}}" "$active" "$(systemctl is-enabled "$unit" 2>/dev/null || echo unknown)" "$desc"; done"##
    )
}

/// Local accounts: login users (uid >= 1000) plus root
pub const USERS: &str = r##"awk -F: '$3 >= 1000 || $3 == 0 {printf "%s,%s,%s,%s,%s\n", $1, $3, $4, $6, $7}' /etc/passwd 2>/dev/null"##;

/// Autostart entries from two sources, each line tagged with its mechanism:
/// enabled systemd units and `@reboot` cron lines.
/// Fields: `name,command,status,type` (command may contain commas).
pub const AUTOSTART: &str = concat!(
    r##"systemctl list-unit-files --type=service --state=enabled --no-legend --plain 2>/dev/null | head -40 | awk '{name=$1; sub(/\.service$/, "", name); printf "%s,%s,%s,systemd\n", name, $1, $2}'"##,
    "; ",
    r##"grep -h '@reboot' /etc/crontab /etc/cron.d/* /var/spool/cron/crontabs/* 2>/dev/null | awk '!/^#/ {$1=""; sub(/^ +/, ""); printf "reboot,%s,enabled,cron\n", $0}'"##,
);

/// Cron jobs aggregated from seven sources, each line tagged with its
/// origin: per-user crontabs, /etc/crontab, /etc/cron.d/*, and the four
/// periodic directories. Fields: `user,schedule,command,source`; commands
/// may contain literal commas, so the parser rejoins the middle fields.
pub const CRON_JOBS: &str = concat!(
    // per-user crontabs (user comes from the file name, no user column)
    r##"for f in /var/spool/cron/crontabs/*; do [ -f "$f" ] && awk -v u="$(basename "$f")" 'NF >= 6 && !/^#/ && $1 !~ /^[A-Z@]/ {s=$1" "$2" "$3" "$4" "$5; $1=$2=$3=$4=$5=""; sub(/^ +/, ""); printf "%s,%s,%s,user crontab\n", u, s, $0}' "$f"; done 2>/dev/null"##,
    "; ",
    // system crontab (sixth column is the user)
    r##"awk 'NF >= 7 && !/^#/ && $1 !~ /^[A-Z@]/ {s=$1" "$2" "$3" "$4" "$5; u=$6; $1=$2=$3=$4=$5=$6=""; sub(/^ +/, ""); printf "%s,%s,%s,/etc/crontab\n", u, s, $0}' /etc/crontab 2>/dev/null"##,
    "; ",
    // drop-in fragments, same column layout as /etc/crontab
    r##"for f in /etc/cron.d/*; do [ -f "$f" ] && awk -v src="$f" 'NF >= 7 && !/^#/ && $1 !~ /^[A-Z@]/ {s=$1" "$2" "$3" "$4" "$5; u=$6; $1=$2=$3=$4=$5=$6=""; sub(/^ +/, ""); printf "%s,%s,%s,%s\n", u, s, $0, src}' "$f"; done 2>/dev/null"##,
    "; ",
    // periodic directories: one synthetic @tag entry per executable
    r##"for d in hourly daily weekly monthly; do for f in /etc/cron."$d"/*; do [ -x "$f" ] && printf 'root,@%s,%s,/etc/cron.%s\n' "$d" "$f" "$d"; done; done 2>/dev/null"##,
);

/// Firewall rules from up to three tools, each guarded by a `command -v`
/// existence check so only installed tools contribute rows. Fields:
/// `chain,target,protocol,source,destination,options,tool`; empty fields
/// are normalized to conventional defaults by the parser.
pub const FIREWALL_RULES: &str = concat!(
    r##"command -v iptables >/dev/null 2>&1 && iptables -L -n 2>/dev/null | awk '/^Chain/ {chain=$2} !/^Chain/ && !/^target/ && NF >= 5 {opts=""; for(i=6;i<=NF;i++) opts=opts (i>6?" ":"") $i; printf "%s,%s,%s,%s,%s,%s,iptables\n", chain, $1, $2, $4, $5, opts}'"##,
    "; ",
    r##"command -v firewall-cmd >/dev/null 2>&1 && { firewall-cmd --list-ports 2>/dev/null | tr ' ' '\n' | awk 'NF {split($0,p,"/"); printf "INPUT,ACCEPT,%s,,,port %s,firewalld\n", p[2], p[1]}'; firewall-cmd --list-services 2>/dev/null | tr ' ' '\n' | awk 'NF {printf "INPUT,ACCEPT,,,,service %s,firewalld\n", $0}'; }"##,
    "; ",
    r##"command -v ufw >/dev/null 2>&1 && ufw status 2>/dev/null | awk 'NR > 3 && NF >= 3 && $2 ~ /^(ALLOW|DENY|REJECT|LIMIT)/ {printf ",%s,,%s,%s,,ufw\n", $2, $3, $1}'"##,
);
